// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::ast::{Expression, Literal, Op};
use crate::error::Cql2Error;
use crate::DATETIME_SENTINEL;

/// Backend-specific syntax knobs. Each collection-provider backend supplies
/// one implementation instead of writing its own CQL lowering pass.
pub trait Dialect {
    fn quote_identifier(&self, name: &str) -> String;
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
    fn like_operator(&self, negated: bool) -> &'static str {
        if negated {
            "NOT LIKE"
        } else {
            "LIKE"
        }
    }
}

/// Maps a CQL2 attribute name to the physical column the backend stores it
/// under, substituting the datasource's configured `datetime_col` for the
/// reserved sentinel name.
pub trait FieldMapper {
    fn map(&self, attribute: &str) -> Result<String, Cql2Error>;
}

pub struct DatetimeFieldMapper<'a> {
    pub datetime_col: Option<&'a str>,
}

impl FieldMapper for DatetimeFieldMapper<'_> {
    fn map(&self, attribute: &str) -> Result<String, Cql2Error> {
        if attribute == DATETIME_SENTINEL {
            self.datetime_col
                .map(str::to_string)
                .ok_or_else(|| Cql2Error::UnknownAttribute(attribute.to_string()))
        } else {
            Ok(attribute.to_string())
        }
    }
}

pub fn lower<D: Dialect, F: FieldMapper>(
    expr: &Expression,
    dialect: &D,
    mapper: &F,
) -> Result<String, Cql2Error> {
    Ok(match expr {
        Expression::Property(name) => dialect.quote_identifier(&mapper.map(name)?),
        Expression::Literal(lit) => render_literal(lit, dialect),
        Expression::Unary { op: Op::Not, arg } => {
            format!("NOT ({})", lower(arg, dialect, mapper)?)
        }
        Expression::Unary { .. } => unreachable!("only NOT is a unary CQL2 operator"),
        Expression::Binary { op, left, right } => {
            let l = lower(left, dialect, mapper)?;
            let r = lower(right, dialect, mapper)?;
            match op {
                Op::Like => format!("{l} {} {r}", dialect.like_operator(false)),
                Op::NotLike => format!("{l} {} {r}", dialect.like_operator(true)),
                _ => format!("{l} {} {r}", sql_symbol(*op)),
            }
        }
        Expression::Logical { op, args } => {
            let joiner = match op {
                Op::And => " AND ",
                Op::Or => " OR ",
                _ => unreachable!("only AND/OR are logical CQL2 operators"),
            };
            let parts = args
                .iter()
                .map(|a| lower(a, dialect, mapper))
                .collect::<Result<Vec<_>, _>>()?;
            format!("({})", parts.join(joiner))
        }
    })
}

fn render_literal<D: Dialect>(lit: &Literal, dialect: &D) -> String {
    match lit {
        Literal::String(s) => dialect.quote_string(s),
        Literal::Number(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
    }
}

fn sql_symbol(op: Op) -> &'static str {
    match op {
        Op::Eq => "=",
        Op::NotEq => "<>",
        Op::Lt => "<",
        Op::LtEq => "<=",
        Op::Gt => ">",
        Op::GtEq => ">=",
        _ => unreachable!("comparison operator expected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AnsiDialect;
    impl Dialect for AnsiDialect {
        fn quote_identifier(&self, name: &str) -> String {
            format!("\"{name}\"")
        }
    }

    #[test]
    fn lowers_comparison_with_field_mapping() {
        let expr = Expression::Binary {
            op: Op::LtEq,
            left: Box::new(Expression::Property("modelled_residential_areas".to_string())),
            right: Box::new(Expression::Literal(Literal::Number(6.0))),
        };
        let mapper = DatetimeFieldMapper { datetime_col: None };
        let sql = lower(&expr, &AnsiDialect, &mapper).unwrap();
        assert_eq!(sql, "\"modelled_residential_areas\" <= 6");
    }

    #[test]
    fn datetime_sentinel_maps_to_configured_column() {
        let expr = Expression::Property(DATETIME_SENTINEL.to_string());
        let mapper = DatetimeFieldMapper { datetime_col: Some("observed_at") };
        let sql = lower(&expr, &AnsiDialect, &mapper).unwrap();
        assert_eq!(sql, "\"observed_at\"");
    }
}
