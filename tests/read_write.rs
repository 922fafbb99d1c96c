use std::io::{Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use nbt_tree::{
    BigEndian, Compound, Error, List, LittleEndian, Payload, ReadOptions, Root, Tag, load,
    load_with, make_root, save, save_with,
};

fn push_name(data: &mut Vec<u8>, name: &str) {
    data.extend_from_slice(&(name.len() as i16).to_be_bytes());
    data.extend_from_slice(name.as_bytes());
}

fn push_header(data: &mut Vec<u8>, tag: u8, name: &str) {
    data.push(tag);
    push_name(data, name);
}

/// Every discriminant once, hand-encoded in big-endian.
fn all_tags_fixture() -> Vec<u8> {
    let mut data = Vec::new();
    push_header(&mut data, 0x0A, "root");

    push_header(&mut data, 0x01, "byte");
    data.push(0x80);

    push_header(&mut data, 0x02, "short");
    data.extend_from_slice(&(-12345i16).to_be_bytes());

    push_header(&mut data, 0x03, "int");
    data.extend_from_slice(&0x1234_5678i32.to_be_bytes());

    push_header(&mut data, 0x04, "long");
    data.extend_from_slice(&i64::MIN.to_be_bytes());

    push_header(&mut data, 0x05, "float");
    data.extend_from_slice(&1.5f32.to_be_bytes());

    push_header(&mut data, 0x06, "double");
    data.extend_from_slice(&(-0.25f64).to_be_bytes());

    push_header(&mut data, 0x07, "bytes");
    data.extend_from_slice(&3i32.to_be_bytes());
    data.extend_from_slice(&[0x01, 0xFF, 0x7F]);

    push_header(&mut data, 0x08, "string");
    push_name(&mut data, "héllo");

    push_header(&mut data, 0x09, "list");
    data.push(0x08);
    data.extend_from_slice(&2i32.to_be_bytes());
    push_name(&mut data, "x");
    push_name(&mut data, "yz");

    push_header(&mut data, 0x0A, "compound");
    push_header(&mut data, 0x03, "inner");
    data.extend_from_slice(&7i32.to_be_bytes());
    data.push(0x00);

    push_header(&mut data, 0x0B, "ints");
    data.extend_from_slice(&2i32.to_be_bytes());
    data.extend_from_slice(&(-1i32).to_be_bytes());
    data.extend_from_slice(&65536i32.to_be_bytes());

    data.push(0x00);
    data
}

fn sample_tree() -> Root {
    let mut nums = List::new(Tag::Int);
    for n in [1i32, 2, 3] {
        nums.add(n).unwrap();
    }

    let mut root = make_root("");
    root.set("flag", 1i8);
    root.set("name", "test");
    root.set("nums", nums);
    root
}

// ==================== Round Trips ====================

#[test]
fn test_all_tags_decode() {
    let data = all_tags_fixture();
    let root = load(&data[..]).unwrap();

    assert_eq!(root.name(), "root");
    assert_eq!(root.len(), 11);
    assert_eq!(root.at("byte").unwrap().byte(), -128);
    assert_eq!(root.at("short").unwrap().short(), -12345);
    assert_eq!(root.at("int").unwrap().int(), 0x1234_5678);
    assert_eq!(root.at("long").unwrap().long(), i64::MIN);
    assert_eq!(root.at("float").unwrap().float(), 1.5);
    assert_eq!(root.at("double").unwrap().double(), -0.25);
    assert_eq!(root.at("bytes").unwrap().byte_array(), &[1, -1, 127]);
    assert_eq!(root.at("string").unwrap().string(), "héllo");

    let list = root.at("list").unwrap().list();
    assert_eq!(list.element_type(), Tag::String);
    assert_eq!(list.len(), 2);
    assert_eq!(list.at(1).unwrap().string(), "yz");

    assert_eq!(root.path("compound/inner").unwrap().int(), 7);
    assert_eq!(root.at("ints").unwrap().int_array(), &[-1, 65536]);
}

#[test]
fn test_bytes_round_trip_exactly() {
    let data = all_tags_fixture();
    let root = load(&data[..]).unwrap();
    let mut out = Vec::new();
    save(&root, &mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_tree_round_trip() {
    let mut root = sample_tree();
    let mut inner = Compound::new();
    inner.set("bytes", vec![1i8, 2, 3]);
    inner.set("ints", vec![i32::MAX, i32::MIN]);
    inner.set("pi", std::f64::consts::PI);
    inner.set("f", 0.75f32);
    inner.set("big", i64::MAX);
    inner.set("small", -2i16);
    root.set("inner", inner);

    let mut compounds = List::new(Tag::Compound);
    compounds.add(Compound::new()).unwrap();
    compounds.add_default().unwrap();
    compounds.at_mut(1).unwrap().compound_mut().set("k", "v");
    root.set("compounds", compounds);

    let bytes = root.to_vec().unwrap();
    let loaded = load(&bytes[..]).unwrap();
    assert_eq!(loaded, root);
}

#[test]
fn test_end_to_end() {
    let root = sample_tree();
    let mut buffer = Vec::new();
    save(&root, &mut buffer).unwrap();

    let loaded = load(&buffer[..]).unwrap();
    assert_eq!(loaded, root);
    assert_eq!(loaded.name(), "");
    assert_eq!(loaded.at("flag").unwrap().byte(), 1);
    assert_eq!(loaded.at("name").unwrap().string(), "test");

    let nums = loaded.at("nums").unwrap().list();
    assert_eq!(nums.len(), 3);
    assert_eq!(nums.at(1).unwrap().int(), 2);
}

#[test]
fn test_saved_layout() {
    let mut root = make_root("r");
    root.set("b", 1i8);

    let mut expected = Vec::new();
    push_header(&mut expected, 0x0A, "r");
    push_header(&mut expected, 0x01, "b");
    expected.push(0x01);
    expected.push(0x00);

    assert_eq!(root.to_vec().unwrap(), expected);
}

#[test]
fn test_empty_containers() {
    let mut root = make_root("");
    root.set("bytes", Vec::<i8>::new());
    root.set("string", "");
    root.set("ints", Vec::<i32>::new());
    root.set("list", List::new(Tag::End));
    root.set("compound", Compound::new());

    let bytes = root.to_vec().unwrap();

    let mut expected = Vec::new();
    push_header(&mut expected, 0x0A, "");
    push_header(&mut expected, 0x07, "bytes");
    expected.extend_from_slice(&[0, 0, 0, 0]);
    push_header(&mut expected, 0x08, "string");
    expected.extend_from_slice(&[0, 0]);
    push_header(&mut expected, 0x0B, "ints");
    expected.extend_from_slice(&[0, 0, 0, 0]);
    push_header(&mut expected, 0x09, "list");
    expected.extend_from_slice(&[0, 0, 0, 0, 0]);
    push_header(&mut expected, 0x0A, "compound");
    expected.push(0x00);
    expected.push(0x00);
    assert_eq!(bytes, expected);

    let loaded = load(&bytes[..]).unwrap();
    assert_eq!(loaded.at("bytes").unwrap().byte_array(), &Vec::<i8>::new());
    assert_eq!(loaded.at("string").unwrap().string(), "");
    assert!(loaded.at("ints").unwrap().int_array().is_empty());
    assert!(loaded.at("list").unwrap().list().is_empty());
    assert!(loaded.at("compound").unwrap().compound().is_empty());
}

#[test]
fn test_duplicate_names_in_stream_keep_last() {
    let mut data = Vec::new();
    push_header(&mut data, 0x0A, "");
    push_header(&mut data, 0x01, "x");
    data.push(1);
    push_header(&mut data, 0x03, "x");
    data.extend_from_slice(&2i32.to_be_bytes());
    data.push(0x00);

    let root = load(&data[..]).unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root.at("x").unwrap().int(), 2);
}

#[test]
fn test_modified_utf8_strings() {
    let mut root = make_root("");
    root.set("nul", "a\0b");
    root.set("emoji", "😀");
    let bytes = root.to_vec().unwrap();

    // NUL is written as the two-byte form 0xC0 0x80.
    assert!(bytes.windows(2).any(|pair| pair == [0xC0, 0x80]));

    let loaded = load(&bytes[..]).unwrap();
    assert_eq!(loaded.at("nul").unwrap().string(), "a\0b");
    assert_eq!(loaded.at("emoji").unwrap().string(), "😀");
}

// ==================== Write Errors ====================

#[test]
fn test_string_too_long() {
    let mut root = make_root("");
    root.set("s", "x".repeat(i16::MAX as usize + 1));
    match root.to_vec() {
        Err(Error::LengthOverflow(len)) => assert_eq!(len, 32768),
        other => panic!("Expected LengthOverflow, got {other:?}"),
    }

    root.set("s", "x".repeat(i16::MAX as usize));
    assert!(root.to_vec().is_ok());
}

#[test]
fn test_write_error_propagates() {
    struct Full;

    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    match save(&sample_tree(), Full) {
        Err(Error::IO(e)) => assert_eq!(e.to_string(), "no space"),
        other => panic!("Expected IO, got {other:?}"),
    }
}

// ==================== Values and Compounds ====================

#[test]
fn test_value_save_writes_named_tag() {
    let root = sample_tree();
    let mut out = Vec::new();
    root.at("nums").unwrap().save(&mut out).unwrap();

    let mut expected = Vec::new();
    push_header(&mut expected, 0x09, "nums");
    expected.push(0x03);
    expected.extend_from_slice(&3i32.to_be_bytes());
    for n in [1i32, 2, 3] {
        expected.extend_from_slice(&n.to_be_bytes());
    }
    assert_eq!(out, expected);
}

#[test]
fn test_compound_save_is_loadable() {
    let mut compound = Compound::new();
    compound.set("v", 42i64);
    let mut out = Vec::new();
    compound.save("detached", &mut out).unwrap();

    let root = load(&out[..]).unwrap();
    assert_eq!(root.name(), "detached");
    assert_eq!(root.at("v").unwrap().payload(), &Payload::Long(42));
    assert_eq!(root.into_compound(), compound);
}

// ==================== Byte Order and Framing ====================

#[test]
fn test_little_endian() {
    let root = sample_tree();
    let mut le = Vec::new();
    save_with::<LittleEndian, _>(&root, &mut le).unwrap();
    let be = root.to_vec().unwrap();
    assert_ne!(le, be);

    // Root header: tag, then a little-endian zero-length name.
    assert_eq!(&le[..3], &[0x0A, 0x00, 0x00]);

    let loaded = load_with::<LittleEndian, _>(&le[..], ReadOptions::default()).unwrap();
    assert_eq!(loaded, root);
    let loaded = load_with::<BigEndian, _>(&be[..], ReadOptions::default()).unwrap();
    assert_eq!(loaded, root);
}

#[test]
fn test_gzip_layered_by_caller() {
    let root = sample_tree();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    save(&root, &mut encoder).unwrap();
    let compressed = encoder.finish().unwrap();
    assert_eq!(&compressed[..2], &[0x1F, 0x8B]);

    let loaded = load(GzDecoder::new(&compressed[..])).unwrap();
    assert_eq!(loaded, root);

    let mut raw = Vec::new();
    GzDecoder::new(&compressed[..])
        .read_to_end(&mut raw)
        .unwrap();
    assert_eq!(raw, root.to_vec().unwrap());
}
