//! edx — command loop library
//!
//! Owns the wire tokenizer and the dispatch loop that drives
//! [`edx_core::Editor`]. Split out of the `edx` binary so the full
//! wire-plus-dispatcher pipeline can be driven in-process by tests,
//! without shelling out to the built binary.

pub mod wire;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, info, warn};

use edx_config::Config;
use edx_core::{Editor, PrintItem};

use wire::{parse_command, read_payload, Command};

/// Runs the command loop to completion against `reader`/`writer`.
///
/// `reader` supplies command and payload lines; `writer` receives `print`
/// output only (never diagnostics — those go through `tracing`).
pub fn run<R: BufRead, W: Write>(config: &Config, reader: &mut R, writer: &mut W) -> anyhow::Result<ExitCode> {
    let max_line = config.limits.max_line_bytes;
    let mut editor = Editor::with_limits(config.limits.initial_capacity, max_line);
    let mut first_emit = true;

    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            info!("end of input reached without an explicit quit");
            break;
        }

        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "malformed command");
                return Ok(ExitCode::FAILURE);
            }
        };
        debug!(?command, "parsed command");

        match command {
            Command::Change(a1, a2) => {
                let payload = match read_payload(reader, max_line) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(error = %e, "malformed change payload");
                        return Ok(ExitCode::FAILURE);
                    }
                };
                if let Err(e) = editor.change(a1, a2, payload) {
                    warn!(error = %e, "change rejected");
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Delete(a1, a2) => {
                editor.delete(a1, a2);
            }
            Command::Print(a1, a2) => {
                for item in editor.print(a1, a2) {
                    if !first_emit {
                        writer.write_all(b"\n")?;
                    }
                    first_emit = false;
                    match item {
                        PrintItem::Line(handle) => writer.write_all(handle.as_ref())?,
                        PrintItem::Missing => writer.write_all(b".")?,
                    }
                }
            }
            Command::Undo(n) => editor.queue_undo(n),
            Command::Redo(n) => editor.queue_redo(n),
            Command::Quit => {
                editor.note_quit();
                writer.flush()?;
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    writer.flush()?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drive(script: &[u8]) -> (ExitCode, Vec<u8>) {
        let config = Config::default();
        let mut reader = Cursor::new(script.to_vec());
        let mut out = Vec::new();
        let code = run(&config, &mut reader, &mut out).unwrap();
        (code, out)
    }

    #[test]
    fn empty_doc_change_then_print() {
        let (code, out) = drive(b"1,3c\nA\nB\nC\n.\n1,3p\nq\n");
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, b"A\nB\nC");
    }

    #[test]
    fn print_past_end() {
        let (_, out) = drive(b"1,3c\nA\nB\nC\n.\n1,5p\nq\n");
        assert_eq!(out, b"A\nB\nC\n.\n.");
    }

    #[test]
    fn delete_middle_and_undo() {
        let (_, out) = drive(b"1,4c\nA\nB\nC\nD\n.\n2,3d\n1,4p\n1u\n1,4p\nq\n");
        assert_eq!(out, b"A\nD\n.\n.\nA\nB\nC\nD");
    }

    #[test]
    fn change_extending_then_undo() {
        let (_, out) = drive(b"1,2c\nX\nY\n.\n1,4c\nP\nQ\nR\nS\n.\n1u\n1,4p\nq\n");
        assert_eq!(out, b"X\nY\n.\n.");
    }

    #[test]
    fn coalesced_undo_redo_cancels() {
        let with_tokens = drive(b"1,1c\nA\n.\n2,2c\nB\n.\n2u\n2r\n1,2p\nq\n").1;
        let without_tokens = drive(b"1,1c\nA\n.\n2,2c\nB\n.\n1,2p\nq\n").1;
        assert_eq!(with_tokens, without_tokens);
    }

    #[test]
    fn redo_invalidated_by_new_mutation() {
        let (_, out) = drive(b"1,1c\nA\n.\n1u\n1,1c\nB\n.\n1r\n1,1p\nq\n");
        assert_eq!(out, b"B");
    }

    #[test]
    fn malformed_command_exits_failure() {
        let (code, _) = drive(b"garbage\n");
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn eof_without_quit_exits_success() {
        let (code, out) = drive(b"1,1c\nA\n.\n1,1p\n");
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, b"A");
    }

    #[test]
    fn configured_max_line_bytes_governs_the_core_not_just_the_wire_layer() {
        let mut config = Config::default();
        config.limits.max_line_bytes = 2000;

        let long_line = vec![b'x'; 1500];
        let mut script = b"1,1c\n".to_vec();
        script.extend_from_slice(&long_line);
        script.extend_from_slice(b"\n.\nq\n");

        let mut reader = Cursor::new(script);
        let mut out = Vec::new();
        let code = run(&config, &mut reader, &mut out).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, long_line);
    }
}
