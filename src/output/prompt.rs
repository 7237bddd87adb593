//! Interactive confirmation before saving a report

use crate::Result;
use std::io::{BufRead, Write};

pub const SAVE_QUESTION: &str = "would you like to save these results as a text file? Default = no";
pub const SAVE_CHOICES: &str = "(y/n):";

/// Ask whether to save; only the exact answer `y` confirms.
///
/// The line terminator is stripped, nothing else is. End of input means no.
pub fn confirm_save<R, W>(input: &mut R, output: &mut W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", SAVE_QUESTION)?;
    write!(output, "{}", SAVE_CHOICES)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }

    let answer = answer
        .strip_suffix('\n')
        .map(|a| a.strip_suffix('\r').unwrap_or(a))
        .unwrap_or(answer.as_str());

    Ok(answer == "y")
}
