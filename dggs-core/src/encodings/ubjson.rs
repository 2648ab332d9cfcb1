// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! UBJSON encoder for the same model `dggs_json` produces, with `$schema`
//! kept present since clients tolerant of both forms may be assumed. No
//! float32 narrowing is performed: every number round-trips through the
//! UBJSON `D` (float64) marker.

use crate::assembler::AssembledData;
use serde_json::Value;

pub fn encode(data: &AssembledData) -> Vec<u8> {
    let document = super::dggs_json::encode(data);
    let mut out = Vec::new();
    write_value(&document, &mut out);
    out
}

fn write_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.push(b'Z'),
        Value::Bool(true) => out.push(b'T'),
        Value::Bool(false) => out.push(b'F'),
        Value::Number(n) => {
            out.push(b'D');
            out.extend_from_slice(&n.as_f64().unwrap_or(f64::NAN).to_be_bytes());
        }
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for item in items {
                write_value(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            for (key, val) in map {
                write_length_prefixed_key(key, out);
                write_value(val, out);
            }
            out.push(b'}');
        }
    }
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    out.push(b'S');
    write_length_prefixed_key(s, out);
}

fn write_length_prefixed_key(s: &str, out: &mut Vec<u8>) {
    out.push(b'l');
    out.extend_from_slice(&(s.len() as i32).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_encodes_as_z_marker() {
        let mut out = Vec::new();
        write_value(&Value::Null, &mut out);
        assert_eq!(out, vec![b'Z']);
    }
}
