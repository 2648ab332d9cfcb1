// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::ast::{Expression, Literal, Op};
use crate::error::Cql2Error;
use serde_json::Value;

pub fn parse(input: &str) -> Result<Expression, Cql2Error> {
    let value: Value = serde_json::from_str(input)?;
    node_to_expression(&value)
}

fn node_to_expression(value: &Value) -> Result<Expression, Cql2Error> {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(prop)) = obj.get("property") {
                return Ok(Expression::Property(prop.clone()));
            }

            let op = obj
                .get("op")
                .and_then(Value::as_str)
                .ok_or(Cql2Error::MissingField("op"))?;
            let args = obj
                .get("args")
                .and_then(Value::as_array)
                .ok_or(Cql2Error::MissingField("args"))?;

            build_op(op, args)
        }
        Value::String(s) => Ok(Expression::Literal(Literal::String(s.clone()))),
        Value::Number(n) => Ok(Expression::Literal(Literal::Number(
            n.as_f64().unwrap_or_default(),
        ))),
        Value::Bool(b) => Ok(Expression::Literal(Literal::Bool(*b))),
        other => Err(Cql2Error::TextSyntax(format!(
            "unsupported CQL2-JSON literal: {other}"
        ))),
    }
}

fn build_op(op: &str, args: &[Value]) -> Result<Expression, Cql2Error> {
    let parsed = |i: usize| -> Result<Expression, Cql2Error> {
        node_to_expression(args.get(i).ok_or(Cql2Error::MissingField("args[i]"))?)
    };

    Ok(match op {
        "and" => Expression::Logical {
            op: Op::And,
            args: args.iter().map(node_to_expression).collect::<Result<_, _>>()?,
        },
        "or" => Expression::Logical {
            op: Op::Or,
            args: args.iter().map(node_to_expression).collect::<Result<_, _>>()?,
        },
        "not" => Expression::Unary {
            op: Op::Not,
            arg: Box::new(parsed(0)?),
        },
        "=" => binary(Op::Eq, parsed(0)?, parsed(1)?),
        "<>" | "!=" => binary(Op::NotEq, parsed(0)?, parsed(1)?),
        "<" => binary(Op::Lt, parsed(0)?, parsed(1)?),
        "<=" => binary(Op::LtEq, parsed(0)?, parsed(1)?),
        ">" => binary(Op::Gt, parsed(0)?, parsed(1)?),
        ">=" => binary(Op::GtEq, parsed(0)?, parsed(1)?),
        "like" => binary(Op::Like, parsed(0)?, parsed(1)?),
        other => return Err(Cql2Error::UnknownOperator(other.to_string())),
    })
}

fn binary(op: Op, left: Expression, right: Expression) -> Expression {
    Expression::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comparison() {
        let expr = parse(r#"{"op": "<=", "args": [{"property": "modelled_residential_areas"}, 6]}"#).unwrap();
        assert_eq!(expr.attributes(), vec!["modelled_residential_areas".to_string()]);
    }

    #[test]
    fn parses_and() {
        let expr = parse(
            r#"{"op": "and", "args": [
                {"op": "=", "args": [{"property": "a"}, 1]},
                {"op": "=", "args": [{"property": "b"}, 2]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(expr.attributes(), vec!["a".to_string(), "b".to_string()]);
    }
}
