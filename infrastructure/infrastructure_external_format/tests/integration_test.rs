//! Integration tests for infrastructure_external_format crate
//!
//! Byte-exact vectors, tag boundaries, list shapes, type distinctness and malformed
//! input, exercised through the public `encode` / `decode` API.

use entities_data_handling::{Atom, BigNumber, Export, Pid, Port, Reference, Term};
use infrastructure_external_format::tags::*;
use infrastructure_external_format::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn round_trip(term: &Term) -> Term {
    let bytes = encode(term).unwrap();
    decode(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Concrete vectors
// ---------------------------------------------------------------------------

#[test]
fn test_small_integer_vector() {
    init_logger();
    assert_eq!(decode(&[131, 97, 1]).unwrap(), Term::integer(1));
    assert_eq!(encode(&Term::integer(1)).unwrap(), vec![131, 97, 1]);
}

#[test]
fn test_nil_vector() {
    init_logger();
    assert_eq!(decode(&[131, 106]).unwrap(), Term::Nil);
}

#[test]
fn test_float_bit_exact() {
    init_logger();
    let bytes = encode(&Term::float(0.1)).unwrap();
    assert_eq!(bytes.len(), 10);
    assert_eq!(bytes[1], NEW_FLOAT_EXT);
    match decode(&bytes).unwrap() {
        Term::Float(f) => assert_eq!(f.to_bits(), 0.1f64.to_bits()),
        other => panic!("expected float, got {:?}", other),
    }
}

#[test]
fn test_integer_5_always_small() {
    init_logger();
    for _ in 0..3 {
        assert_eq!(encode(&Term::integer(5)).unwrap(), vec![131, SMALL_INTEGER_EXT, 5]);
    }
    // A 4-byte INTEGER_EXT 5 decodes to the same value
    assert_eq!(decode(&[131, INTEGER_EXT, 0, 0, 0, 5]).unwrap(), Term::integer(5));
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn test_atom_length_boundary() {
    init_logger();
    let short = Term::atom("a".repeat(255));
    let bytes = encode(&short).unwrap();
    assert_eq!(bytes[1], SMALL_ATOM_EXT);
    assert_eq!(bytes[2], 255);
    assert_eq!(round_trip(&short), short);

    let long = Term::atom("a".repeat(256));
    let bytes = encode(&long).unwrap();
    assert_eq!(bytes[1], ATOM_EXT);
    assert_eq!(&bytes[2..4], &[1, 0]);
    assert_eq!(round_trip(&long), long);
}

#[test]
fn test_utf8_atom_length_boundary() {
    init_logger();
    // 'λ' is two UTF-8 bytes: 127 of them plus one ASCII char is 255 bytes
    let short = Term::atom(format!("{}a", "λ".repeat(127)));
    assert_eq!(encode(&short).unwrap()[1], SMALL_ATOM_UTF8_EXT);
    assert_eq!(round_trip(&short), short);

    let long = Term::atom("λ".repeat(128));
    assert_eq!(encode(&long).unwrap()[1], ATOM_UTF8_EXT);
    assert_eq!(round_trip(&long), long);
}

#[test]
fn test_bignum_length_boundary() {
    init_logger();
    let mut digits = vec![0u8; 255];
    digits[254] = 0x01;
    let small = Term::Integer(BigNumber::from_sign_and_le_bytes(false, &digits));
    let bytes = encode(&small).unwrap();
    assert_eq!(bytes[1], SMALL_BIG_EXT);
    assert_eq!(bytes[2], 255);
    assert_eq!(round_trip(&small), small);

    let mut digits = vec![0u8; 256];
    digits[255] = 0x01;
    let large = Term::Integer(BigNumber::from_sign_and_le_bytes(true, &digits));
    let bytes = encode(&large).unwrap();
    assert_eq!(bytes[1], LARGE_BIG_EXT);
    assert_eq!(&bytes[2..6], &[0, 0, 1, 0]);
    assert_eq!(bytes[6], 1);
    assert_eq!(round_trip(&large), large);
}

#[test]
fn test_integer_range_edges_round_trip() {
    init_logger();
    for value in [
        0i128,
        255,
        256,
        -1,
        i32::MIN as i128,
        i32::MAX as i128,
        i32::MIN as i128 - 1,
        i32::MAX as i128 + 1,
        i64::MIN as i128,
        u64::MAX as i128,
        i128::MIN,
    ] {
        let term = Term::integer(value);
        assert_eq!(round_trip(&term), term, "value {}", value);
    }
}

#[test]
fn test_tuple_arity_boundary() {
    init_logger();
    let small = Term::tuple(vec![Term::Nil; 255]);
    assert_eq!(encode(&small).unwrap()[1], SMALL_TUPLE_EXT);
    let large = Term::tuple(vec![Term::Nil; 256]);
    assert_eq!(encode(&large).unwrap()[1], LARGE_TUPLE_EXT);
    assert_eq!(round_trip(&large), large);
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[test]
fn test_improper_list_keeps_tail() {
    init_logger();
    let term = Term::improper_list(vec![Term::integer(1), Term::integer(2)], Term::integer(3));
    let decoded = round_trip(&term);
    match &decoded {
        Term::List(list) => {
            assert_eq!(list.elements(), &[Term::integer(1), Term::integer(2)]);
            assert_eq!(list.tail(), &Term::integer(3));
            assert!(!list.is_proper());
        }
        other => panic!("expected list, got {:?}", other),
    }
    assert_eq!(decoded, term);
}

#[test]
fn test_proper_list_has_nil_tail() {
    init_logger();
    let term = Term::list(vec![Term::integer(1), Term::integer(2)]);
    match round_trip(&term) {
        Term::List(list) => assert!(list.is_proper()),
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn test_byte_list_round_trips_as_equal_list() {
    init_logger();
    let term = Term::byte_list(b"hello".to_vec());
    let bytes = encode(&term).unwrap();
    assert_eq!(bytes[1], STRING_EXT);
    assert_eq!(decode(&bytes).unwrap(), term);
}

#[test]
fn test_long_byte_list_round_trips() {
    init_logger();
    let term = Term::byte_list(vec![42u8; 70_000]);
    let bytes = encode(&term).unwrap();
    assert_eq!(bytes[1], LIST_EXT);
    assert_eq!(decode(&bytes).unwrap(), term);
}

// ---------------------------------------------------------------------------
// Type distinctness
// ---------------------------------------------------------------------------

#[test]
fn test_binary_and_integer_list_stay_distinct() {
    init_logger();
    let binary = Term::binary(vec![1, 2, 3]);
    let list = Term::list(vec![Term::integer(1), Term::integer(2), Term::integer(3)]);

    let decoded_binary = round_trip(&binary);
    let decoded_list = round_trip(&list);
    assert!(matches!(decoded_binary, Term::Binary(_)));
    assert!(matches!(decoded_list, Term::List(_)));
    assert_ne!(decoded_binary, list);
    assert_ne!(decoded_list, binary);
}

#[test]
fn test_empty_forms_pairwise_distinct() {
    init_logger();
    let nil = round_trip(&Term::Nil);
    let tuple = round_trip(&Term::tuple(vec![]));
    let binary = round_trip(&Term::binary(vec![]));
    assert_ne!(nil, tuple);
    assert_ne!(nil, binary);
    assert_ne!(tuple, binary);
    assert_ne!(nil, Term::atom("nil"));
}

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

#[test]
fn test_identity_types_round_trip() {
    init_logger();
    let node = Atom::new("peer@localhost");
    let terms = vec![
        Term::Pid(Pid::new(node.clone(), 85, 0, 0)),
        Term::Pid(Pid::new(node.clone(), 85, 3, 0x1234_5678)),
        Term::Port(Port::new(node.clone(), 7, 1)),
        Term::Port(Port::new(node.clone(), 7, 300)),
        Term::Reference(Reference::new(node.clone(), vec![1], 2).unwrap()),
        Term::Reference(Reference::new(node.clone(), vec![3, 2, 1], 0xFFFF_FFFF).unwrap()),
        Term::Export(Export::new(Atom::new("lists"), Atom::new("map"), 2)),
        Term::Export(Export::new(Atom::new("m"), Atom::new("f"), 1000)),
    ];
    for term in terms {
        assert_eq!(round_trip(&term), term);
    }
}

#[test]
fn test_independently_decoded_pids_are_equal() {
    init_logger();
    let bytes = encode(&Term::Pid(Pid::new(Atom::new("n@h"), 1, 2, 3))).unwrap();
    let a = decode(&bytes).unwrap();
    let b = decode(&bytes.clone()).unwrap();
    assert_eq!(a, b);

    let mut changed = bytes.clone();
    let last = changed.len() - 1;
    changed[last] = 4;
    assert_ne!(decode(&changed).unwrap(), a);
}

#[test]
fn test_reference_word_order_preserved() {
    init_logger();
    let reference = Reference::new(Atom::new("n@h"), vec![1, 2, 3], 0).unwrap();
    match round_trip(&Term::Reference(reference)) {
        Term::Reference(r) => assert_eq!(r.ids(), &[1, 2, 3]),
        other => panic!("expected reference, got {:?}", other),
    }
}

#[test]
fn test_export_arity_from_big_integer_tag() {
    init_logger();
    // Arity sent as a zero-padded SMALL_BIG_EXT is still accepted
    let data = [
        131,
        EXPORT_EXT,
        ATOM_EXT,
        0,
        1,
        b'm',
        SMALL_ATOM_UTF8_EXT,
        1,
        b'f',
        SMALL_BIG_EXT,
        2,
        0,
        3,
        0,
    ];
    assert_eq!(
        decode(&data).unwrap(),
        Term::Export(Export::new(Atom::new("m"), Atom::new("f"), 3))
    );
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn test_text_defaults_to_utf8_binary() {
    init_logger();
    let decoded = round_trip(&Term::text("grüß"));
    assert_eq!(decoded, Term::binary("grüß".as_bytes()));
    assert_eq!(decoded.as_text().as_deref(), Some("grüß"));
}

#[test]
fn test_text_as_byte_list_round_trips_as_text() {
    init_logger();
    let encode_options = EncodeOptions::default().with_text_encoding(TextEncoding::ByteList);
    let decode_options = DecodeOptions::default().with_strings_as_text(true);
    let term = Term::text("ñandú");
    let bytes = encode_with(&term, &encode_options).unwrap();
    assert_eq!(bytes[1], STRING_EXT);
    assert_eq!(decode_with(&bytes, &decode_options).unwrap(), term);

    // Without the switch the same bytes are a list that still reads as text
    let plain = decode(&bytes).unwrap();
    assert_eq!(plain.as_text().as_deref(), Some("ñandú"));
}

#[test]
fn test_long_text_byte_list_reads_back_as_text() {
    init_logger();
    let text = "ab".repeat(40_000);
    let options = EncodeOptions::default().with_text_encoding(TextEncoding::ByteList);
    let bytes = encode_with(&Term::text(text.clone()), &options).unwrap();
    assert_eq!(bytes[1], LIST_EXT);
    let decoded = decode_with(&bytes, &DecodeOptions::default().with_strings_as_text(true)).unwrap();
    assert_eq!(decoded.as_text().as_deref(), Some(text.as_str()));
}

#[test]
fn test_text_as_code_points() {
    init_logger();
    let options = EncodeOptions::default().with_text_encoding(TextEncoding::CodePoints);
    let bytes = encode_with(&Term::text("a€"), &options).unwrap();
    let expected = Term::list(vec![Term::integer(97), Term::integer(0x20AC)]);
    assert_eq!(decode(&bytes).unwrap(), expected);
}

#[test]
fn test_non_utf8_string_stays_a_list_under_text_switch() {
    init_logger();
    let options = DecodeOptions::default().with_strings_as_text(true);
    let term = decode_with(&[131, STRING_EXT, 0, 2, 0xE9, 0x41], &options).unwrap();
    assert_eq!(term, Term::byte_list(vec![0xE9, 0x41]));
    assert_eq!(term.as_text(), None);
}

#[test]
fn test_empty_input_is_format_error() {
    init_logger();
    assert_eq!(
        decode(&[]),
        Err(DecodeError::Format(FormatError::MissingVersion))
    );
}

#[test]
fn test_wrong_version_is_format_error() {
    init_logger();
    assert_eq!(
        decode(&[130, 97, 1]),
        Err(DecodeError::Format(FormatError::UnsupportedVersion(130)))
    );
}

#[test]
fn test_version_byte_only_fails() {
    init_logger();
    assert!(matches!(
        decode(&[131]),
        Err(DecodeError::Truncated { offset: 1, .. })
    ));
}

#[test]
fn test_declared_length_past_end_fails() {
    init_logger();
    assert_eq!(
        decode(&[131, BINARY_EXT, 0, 0, 0, 10, 1, 2, 3]),
        Err(DecodeError::Truncated {
            offset: 6,
            needed: 10,
            available: 3
        })
    );
    assert!(matches!(
        decode(&[131, STRING_EXT, 0, 5, b'a']),
        Err(DecodeError::Truncated { .. })
    ));
    assert!(matches!(
        decode(&[131, SMALL_ATOM_EXT, 9, b'a']),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn test_unknown_tag_fails() {
    init_logger();
    assert_eq!(
        decode(&[131, 255]),
        Err(DecodeError::UnknownTag {
            tag: 255,
            offset: 1
        })
    );
    // Nested unknown tag reports its own offset
    assert_eq!(
        decode(&[131, SMALL_TUPLE_EXT, 2, 97, 1, 200]),
        Err(DecodeError::UnknownTag {
            tag: 200,
            offset: 5
        })
    );
}

#[test]
fn test_list_missing_tail_fails() {
    init_logger();
    assert!(matches!(
        decode(&[131, LIST_EXT, 0, 0, 0, 1, 97, 1]),
        Err(DecodeError::Truncated { offset: 8, .. })
    ));
}

#[test]
fn test_adversarial_nesting_is_bounded() {
    init_logger();
    let mut data = vec![131];
    for _ in 0..100_000 {
        data.extend_from_slice(&[SMALL_TUPLE_EXT, 1]);
    }
    data.push(NIL_EXT);
    assert_eq!(
        decode(&data),
        Err(DecodeError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_adversarial_list_tail_nesting_is_bounded() {
    init_logger();
    let mut data = vec![131];
    for _ in 0..100_000 {
        data.extend_from_slice(&[LIST_EXT, 0, 0, 0, 1, SMALL_INTEGER_EXT, 0]);
    }
    data.push(NIL_EXT);
    assert!(matches!(
        decode(&data),
        Err(DecodeError::DepthLimitExceeded { .. })
    ));
}

#[test]
fn test_encode_rejects_excess_depth() {
    init_logger();
    let mut term = Term::integer(0);
    for _ in 0..=DEFAULT_MAX_DEPTH {
        term = Term::tuple(vec![term]);
    }
    assert_eq!(
        encode(&term),
        Err(EncodeError::DepthLimitExceeded {
            limit: DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_decode_prefix_walks_concatenated_terms() {
    init_logger();
    let mut stream = encode(&Term::atom("first")).unwrap();
    stream.extend(encode(&Term::integer(2)).unwrap());
    stream.extend(encode(&Term::binary(vec![3])).unwrap());

    let mut offset = 0;
    let mut terms = Vec::new();
    while offset < stream.len() {
        let (term, consumed) = decode_prefix(&stream[offset..]).unwrap();
        terms.push(term);
        offset += consumed;
    }
    assert_eq!(
        terms,
        vec![Term::atom("first"), Term::integer(2), Term::binary(vec![3])]
    );
    assert!(matches!(
        decode(&stream),
        Err(DecodeError::TrailingBytes { consumed: 8, .. })
    ));
}

#[test]
fn test_concurrent_use() {
    init_logger();
    let term = Term::tuple(vec![
        Term::atom("ok"),
        Term::list(vec![Term::integer(1), Term::float(2.5)]),
    ]);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let term = term.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let bytes = encode(&term).unwrap();
                    assert_eq!(decode(&bytes).unwrap(), term);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
