#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode, and the encoding must be stable.
    // Bytes are compared rather than trees so NaN floats don't trip the check.
    if let Ok(root) = nbt_tree::load(data) {
        if let Ok(bytes) = root.to_vec() {
            let reloaded = nbt_tree::load(&bytes[..]).expect("re-encoded tree must decode");
            assert_eq!(reloaded.to_vec().expect("reloaded tree must encode"), bytes);
        }
    }
});
