//! Wire Tokenizer
//!
//! Parses one command line into a [`Command`], and reads payload lines for
//! `change` up to the lone `.` terminator. Kept deliberately thin: the
//! history engine does the real work, this module only turns text into the
//! `(command, addr1, addr2, line_source)` shape it consumes.

use std::io::BufRead;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Change(usize, usize),
    Delete(usize, usize),
    Print(usize, usize),
    Undo(u64),
    Redo(u64),
    Quit,
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed command: {0:?}")]
    MalformedCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses one trimmed command line.
///
/// `change`/`delete` require `a1 >= 1`: the history engine assumes 1-based
/// addressing and never validates it, so a violation is rejected here
/// rather than risking a panic downstream. `print` is exempted — an `a1`
/// of 0 is valid input that simply prints as missing (`.`) per the address
/// range it covers.
pub fn parse_command(line: &str) -> Result<Command, WireError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let bad = || WireError::MalformedCommand(line.to_string());

    if line == "q" {
        return Ok(Command::Quit);
    }

    if let Some(rest) = line.strip_suffix('u') {
        let n: u64 = rest.parse().map_err(|_| bad())?;
        return Ok(Command::Undo(n));
    }
    if let Some(rest) = line.strip_suffix('r') {
        let n: u64 = rest.parse().map_err(|_| bad())?;
        return Ok(Command::Redo(n));
    }

    if line.is_empty() {
        return Err(bad());
    }
    let (addrs, tag) = line.split_at(line.len() - 1);

    let mut parts = addrs.splitn(2, ',');
    let a1_str = parts.next().ok_or_else(bad)?;
    let a2_str = parts.next().ok_or_else(bad)?;
    if parts.next().is_some() {
        return Err(bad());
    }
    let a1: usize = a1_str.parse().map_err(|_| bad())?;
    let a2: usize = a2_str.parse().map_err(|_| bad())?;

    match tag {
        "c" => {
            if a1 < 1 {
                return Err(bad());
            }
            Ok(Command::Change(a1, a2))
        }
        "d" => Ok(Command::Delete(a1, a2)),
        "p" => Ok(Command::Print(a1, a2)),
        _ => Err(bad()),
    }
}

/// Reads payload lines for a `change` command from `reader` until a lone
/// `.` terminator line. Rejects any line over `max_line` bytes.
pub fn read_payload<R: BufRead>(reader: &mut R, max_line: usize) -> Result<Vec<Vec<u8>>, WireError> {
    let mut out = Vec::new();
    loop {
        let mut buf = Vec::new();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Err(WireError::MalformedCommand("unexpected end of input in payload".to_string()));
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf == b"." {
            break;
        }
        if buf.len() > max_line {
            return Err(WireError::MalformedCommand(format!(
                "payload line of {} bytes exceeds maximum of {max_line}",
                buf.len()
            )));
        }
        out.push(buf);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_change_delete_print() {
        assert_eq!(parse_command("1,3c").unwrap(), Command::Change(1, 3));
        assert_eq!(parse_command("2,3d").unwrap(), Command::Delete(2, 3));
        assert_eq!(parse_command("1,5p").unwrap(), Command::Print(1, 5));
    }

    #[test]
    fn parses_undo_redo_quit() {
        assert_eq!(parse_command("3u").unwrap(), Command::Undo(3));
        assert_eq!(parse_command("2r").unwrap(), Command::Redo(2));
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
    }

    #[test]
    fn print_allows_zero_address() {
        assert_eq!(parse_command("0,1p").unwrap(), Command::Print(0, 1));
    }

    #[test]
    fn change_rejects_zero_address() {
        assert!(parse_command("0,1c").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("abc").is_err());
        assert!(parse_command("1,2,3c").is_err());
        assert!(parse_command("1x2c").is_err());
    }

    #[test]
    fn reads_payload_until_terminator() {
        let input = b"A\nB\nC\n.\n".to_vec();
        let mut reader = std::io::Cursor::new(input);
        let payload = read_payload(&mut reader, 1024).unwrap();
        assert_eq!(payload, vec![b"A".to_vec(), b"B".to_vec(), b"C".to_vec()]);
    }

    #[test]
    fn payload_rejects_oversized_line() {
        let mut input = vec![b'x'; 10];
        input.push(b'\n');
        input.extend_from_slice(b".\n");
        let mut reader = std::io::Cursor::new(input);
        assert!(read_payload(&mut reader, 5).is_err());
    }

    #[test]
    fn payload_rejects_eof_before_terminator() {
        let mut reader = std::io::Cursor::new(b"A\nB\n".to_vec());
        assert!(read_payload(&mut reader, 1024).is_err());
    }
}
