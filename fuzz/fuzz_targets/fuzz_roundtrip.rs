#![no_main]
use libfuzzer_sys::fuzz_target;
use toml_tree::{parse_str, serialize};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else { return };
    let Ok(first) = parse_str(input) else { return };

    // Compare text rather than trees so that `nan` does not break equality.
    let encoded = serialize(&first);
    match parse_str(&encoded) {
        Ok(second) => {
            let reencoded = serialize(&second);
            if encoded != reencoded {
                panic!(
                    "roundtrip mismatch!\nInput: {}\nFirst: {}\nSecond: {}",
                    input, encoded, reencoded
                );
            }
        }
        Err(e) => {
            panic!(
                "failed to parse serialized document!\nInput: {}\nSerialized: {}\nError: {}",
                input, encoded, e
            );
        }
    }
});
