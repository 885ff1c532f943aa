//! Scanner for compound `options` values such as `a: 1; b.bind: c`.

use crate::chars;
use crate::error::Result;

/// Splits `value` into `key: value` segments and hands each one to `flush`.
///
/// Keys are trimmed; values are passed through untouched. The first `:` of a
/// segment ends its key, later ones belong to the value. There is no escaping
/// or quoting, so a value cannot contain `;`. A segment with no `:` is dropped.
pub fn scan_options<F>(value: &str, mut flush: F) -> Result<()>
where
    F: FnMut(&str, &str) -> Result<()>,
{
    let mut name: Option<String> = None;
    let mut target = String::new();

    for current in value.chars() {
        if current == chars::SEMICOLON {
            if let Some(key) = name.take() {
                flush(&key, &target)?;
            }
            target.clear();
        } else if current == chars::COLON && name.is_none() {
            name = Some(target.trim().to_string());
            target.clear();
        } else {
            target.push(current);
        }
    }

    if let Some(key) = name {
        flush(&key, &target)?;
    }

    Ok(())
}
