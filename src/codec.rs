//! Text formats of the three record kinds that flow through a job.
//!
//! | stage input / output | format                                          |
//! |----------------------|-------------------------------------------------|
//! | raw log line         | `timestamp<TAB>user<TAB>action<TAB>value[...]`  |
//! | intermediate record  | `user<TAB>action,value`                         |
//! | summary              | `user<TAB>action<TAB>count<TAB>total<TAB>avg`   |

use std::fmt;

use anyhow::{bail, Context, Result};

use crate::{Record, Summary};

/// The fields of a raw log line that the map stage looks at.
///
/// Borrowed from the input line; nothing is validated beyond the field count.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogLine<'a> {
    pub timestamp: &'a str,
    pub user_id: &'a str,
    pub action: &'a str,
    pub value: &'a str,
}

impl<'a> LogLine<'a> {
    /// Splits `line` into its first four tab-separated fields.
    ///
    /// Returns [`None`] if the line has fewer than four fields. Extra fields
    /// are ignored.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split('\t');
        Some(Self {
            timestamp: fields.next()?,
            user_id: fields.next()?,
            action: fields.next()?,
            value: fields.next()?,
        })
    }

    /// The intermediate record for this line. The value is passed through as
    /// written; the reduce stage is the one that parses it.
    pub fn to_intermediate(&self) -> String {
        format!("{}\t{},{}", self.user_id, self.action, self.value)
    }
}

/// Parses one intermediate record (`key<TAB>action,value`).
///
/// The key is everything before the first tab. The remainder must hold
/// exactly one comma, and the part after it must be a float.
pub fn decode_intermediate(line: &str) -> Result<Record> {
    let Some((key, value_field)) = line.split_once('\t') else {
        bail!("no tab separator in {:?}", line);
    };

    let mut parts = value_field.split(',');
    let (Some(action), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected `action,value` but found {:?}", value_field);
    };

    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value {:?} for key {:?}", value, key))?;

    Ok(Record::new(key, action, value))
}

impl fmt::Display for Summary {
    /// Totals and averages are written with two decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.key,
            self.action,
            self.count,
            Fixed2(self.total),
            Fixed2(self.average())
        )
    }
}

/// Two-decimal rendering, with NaN spelled `nan` like infinities are `inf`.
struct Fixed2(f64);

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
