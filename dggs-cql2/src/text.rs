// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::ast::{Expression, Literal, Op};
use crate::error::Cql2Error;

pub fn parse(input: &str) -> Result<Expression, Cql2Error> {
    cql2_text::expression(input).map_err(|e| Cql2Error::TextSyntax(e.to_string()))
}

peg::parser! {
    grammar cql2_text() for str {
        rule _() = [' ' | '\t' | '\n' | '\r']*

        rule identifier() -> String
            = "\"" s:$((!['"'] [_])*) "\"" { s.to_string() }
            / s:$(['a'..='z' | 'A'..='Z' | '_']['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) { s.to_string() }

        rule number() -> f64
            = s:$("-"? ['0'..='9']+ ("." ['0'..='9']+)?) { s.parse().unwrap() }

        rule string() -> String
            = "'" s:$((!['\''] [_])*) "'" { s.to_string() }

        rule boolean() -> bool
            = "TRUE" { true } / "true" { true } / "FALSE" { false } / "false" { false }

        rule literal() -> Expression
            = b:boolean() { Expression::Literal(Literal::Bool(b)) }
            / n:number() { Expression::Literal(Literal::Number(n)) }
            / s:string() { Expression::Literal(Literal::String(s)) }

        rule property() -> Expression
            = id:identifier() { Expression::Property(id) }

        rule operand() -> Expression
            = literal() / property()

        rule cmp_op() -> Op
            = "<=" { Op::LtEq }
            / ">=" { Op::GtEq }
            / "<>" { Op::NotEq }
            / "!=" { Op::NotEq }
            / "=" { Op::Eq }
            / "<" { Op::Lt }
            / ">" { Op::Gt }

        rule comparison() -> Expression
            = l:operand() _ op:cmp_op() _ r:operand() {
                Expression::Binary { op, left: Box::new(l), right: Box::new(r) }
            }
            / l:operand() _ ("NOT" _ "LIKE" / "not" _ "like") _ r:operand() {
                Expression::Binary { op: Op::NotLike, left: Box::new(l), right: Box::new(r) }
            }
            / l:operand() _ ("LIKE" / "like") _ r:operand() {
                Expression::Binary { op: Op::Like, left: Box::new(l), right: Box::new(r) }
            }

        rule primary() -> Expression
            = "(" _ e:expression() _ ")" { e }
            / ("NOT" / "not") _ e:primary() {
                Expression::Unary { op: Op::Not, arg: Box::new(e) }
            }
            / comparison()

        rule and_expr() -> Expression
            = first:primary() rest:(_ ("AND" / "and") _ e:primary() { e })* {
                if rest.is_empty() {
                    first
                } else {
                    let mut args = vec![first];
                    args.extend(rest);
                    Expression::Logical { op: Op::And, args }
                }
            }

        pub rule expression() -> Expression
            = _ first:and_expr() rest:(_ ("OR" / "or") _ e:and_expr() { e })* _ {
                if rest.is_empty() {
                    first
                } else {
                    let mut args = vec![first];
                    args.extend(rest);
                    Expression::Logical { op: Op::Or, args }
                }
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_comparison() {
        let expr = parse("\"modelled_residential_areas\" <= 6").unwrap();
        assert_eq!(expr.attributes(), vec!["modelled_residential_areas".to_string()]);
    }

    #[test]
    fn parses_conjunction() {
        let expr = parse("\"a\" > 1 AND \"b\" < 2").unwrap();
        assert_eq!(expr.attributes(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn parses_not_like() {
        let expr = parse("\"name\" NOT LIKE 'foo%'").unwrap();
        assert_eq!(expr.attributes(), vec!["name".to_string()]);
    }
}
