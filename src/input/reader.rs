use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal, Read};

pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

pub struct InputReader;

impl InputReader {
    /// Returns the text to translate.
    ///
    /// Words given on the command line are joined with single spaces. With
    /// no words, piped stdin is read; an interactive terminal yields `None`.
    pub fn read(words: &[String]) -> Result<Option<String>> {
        if !words.is_empty() {
            return Ok(Some(Self::join_words(words)));
        }

        if io::stdin().is_terminal() {
            return Ok(None);
        }

        Self::read_from(io::stdin().lock()).map(Some)
    }

    pub fn join_words(words: &[String]) -> String {
        words.join(" ")
    }

    fn read_from(mut source: impl Read) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = source
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).",
                    buffer.len() as f64 / 1024.0 / 1024.0
                );
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
