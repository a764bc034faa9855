//! Interactive input path prompt.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

const PROMPT: &str = "Enter csv file path: ";

/// Ask for a file path until a non-blank answer is given.
///
/// Returns [`crate::Error::InvalidConfig`] if input ends without a path.
pub(crate) fn prompt_for_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> crate::Result<PathBuf> {
    let io_err = |e: std::io::Error| crate::Error::io(e, "<terminal>");

    writeln!(output, "CSV Health Check").map_err(io_err)?;
    writeln!(output, "Provide the path to the CSV file you want to validate.").map_err(io_err)?;

    loop {
        write!(output, "{PROMPT}").map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(crate::Error::invalid_config("no file path provided"));
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(PathBuf::from(answer));
        }
        writeln!(
            output,
            "The input provided is empty. Please provide the file path."
        )
        .map_err(io_err)?;
    }
}
