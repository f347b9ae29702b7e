//! # Drive script interpreter module
//!
//! This module provides an interpreter for timed command scripts, allowing
//! the executables to be driven from a file rather than from live input.
//!
//! Script entries have the form `<time_s>: <json>;`, one per line, where the
//! JSON payload deserialises into the interpreter's command type. The
//! interpreter is generic over that type so each executable can script its
//! own commands.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct TimedCmd<C> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The command to run
    cmd: C
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_cmds` to acquire a list of commands that need executing.
pub struct ScriptInterpreter<C> {
    _script_path: PathBuf,
    cmds: VecDeque<TimedCmd<C>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidCmd(f64, serde_json::Error)
}

pub enum PendingCmds<C> {
    None,
    Some(Vec<C>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: DeserializeOwned> ScriptInterpreter<C> {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.to_str().unwrap().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(script_path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        // Empty queue of commands
        let mut cmd_queue: VecDeque<TimedCmd<C>> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .unwrap();

        let mut num_caps = 0;

        for cap in re.captures_iter(&script) {
            // Parse the exec time
            let exec_time_s: f64 = match cap.get(1).unwrap().as_str().parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the command from the payload. The scripts contain JSON
            // only.
            let cmd: C = match serde_json::from_str(
                cap.get(3).unwrap().as_str())
            {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidCmd(
                    exec_time_s, e
                ))
            };

            // Build command from the match
            cmd_queue.push_back(TimedCmd {
                exec_time_s,
                cmd
            });

            num_caps += 1;
        }

        if num_caps == 0 {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: path,
            cmds: cmd_queue
        })
    }

    /// Return a vector of pending commands, or `None` if no commands need
    /// executing now.
    pub fn get_pending_cmds(&mut self) -> PendingCmds<C> {
        self.get_pending_at(get_elapsed_seconds())
    }

    /// Return the commands pending at the given session-elapsed time.
    fn get_pending_at(&mut self, current_time_s: f64) -> PendingCmds<C> {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.len() == 0 {
            return PendingCmds::EndOfScript
        }

        let mut cmd_vec: Vec<C> = vec![];

        // Peek items from the queue, if the head's exec time is lower than
        // the current time add it to the vector, and keep adding commands
        // until the exec times are larger than the current time.
        while
            self.cmds.len() > 0
            &&
            self.cmds.front().unwrap().exec_time_s < current_time_s
        {
            cmd_vec.push(self.cmds.pop_front().unwrap().cmd);
        }

        // If the vector is longer than 0 return Some, otherwise None
        if cmd_vec.len() > 0 {
            PendingCmds::Some(cmd_vec)
        }
        else {
            PendingCmds::None
        }
    }

    /// Get the number of commands in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    enum TestCmd {
        Stop,
        Speed { sp: f64 }
    }

    /// Write the given script text to a unique temp file and return its path.
    fn write_script(name: &str, text: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_parse_and_pending() {
        let path = write_script(
            "si_test_parse.dds",
            "# a comment line\n\
             0.5: {\"Speed\": {\"sp\": 0.25}};\n\
             2.0: \"Stop\";\n"
        );

        let mut si = ScriptInterpreter::<TestCmd>::new(&path).unwrap();

        assert_eq!(si.get_num_cmds(), 2);
        assert_eq!(si.get_duration(), 2.0);

        // Nothing pending before the first entry's time
        assert!(matches!(si.get_pending_at(0.1), PendingCmds::None));

        // First entry becomes pending once its time has passed
        match si.get_pending_at(1.0) {
            PendingCmds::Some(v) => {
                assert_eq!(v, vec![TestCmd::Speed { sp: 0.25 }])
            }
            _ => panic!("Expected a pending command")
        }

        // Second entry, then end of script
        match si.get_pending_at(3.0) {
            PendingCmds::Some(v) => assert_eq!(v, vec![TestCmd::Stop]),
            _ => panic!("Expected a pending command")
        }
        assert!(matches!(si.get_pending_at(3.0), PendingCmds::EndOfScript));
    }

    #[test]
    fn test_empty_script_rejected() {
        let path = write_script("si_test_empty.dds", "# nothing here\n");

        assert!(matches!(
            ScriptInterpreter::<TestCmd>::new(&path),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_bad_payload_rejected() {
        let path = write_script("si_test_bad.dds", "1.0: {\"NotACmd\": 1};\n");

        assert!(matches!(
            ScriptInterpreter::<TestCmd>::new(&path),
            Err(ScriptError::InvalidCmd(_, _))
        ));
    }
}
