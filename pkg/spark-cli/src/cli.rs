use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{bail, Context};
use spark_note::{
    check_multiple_nullifiers, commit, generate_nullifier, to_json, NoteJson, NotePolicy,
    Nullifier, Secret,
};

#[derive(Debug, Parser)]
#[command(name = "spark", version, about)]
pub struct Cli {
    /// Path to a toml file with the note policy
    #[arg(long, global = true, env = "SPARK_NOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs to stderr as json
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a note and print it as json
    Create {
        /// The value of the note
        #[arg(long)]
        value: u64,

        /// Hex encoded secret. A random secret is generated if this is omitted
        #[arg(long, value_parser = parse_secret)]
        secret: Option<Secret>,

        /// Pretty print the json
        #[arg(long)]
        pretty: bool,
    },

    /// Print the commitment to a value and secret
    Commit {
        /// The value to commit to
        #[arg(long)]
        value: u64,

        /// Hex encoded secret
        #[arg(long, value_parser = parse_secret)]
        secret: Secret,
    },

    /// Print the nullifier of a json note
    Nullifier {
        /// The note as json, or `-` to read it from stdin
        note: String,

        /// Hex encoded secret to derive the nullifier with. Defaults to the note's own secret
        #[arg(long, value_parser = parse_secret)]
        secret: Option<Secret>,
    },

    /// Check nullifiers against a file of spent nullifiers
    ///
    /// The file has one hex nullifier per line. Blank lines and lines starting with `#` are
    /// ignored
    Check {
        /// The file of spent nullifiers
        #[arg(long)]
        spent: PathBuf,

        /// Hex encoded nullifiers to check
        #[arg(required = true)]
        nullifiers: Vec<Nullifier>,
    },

    /// Decode a json note and verify its commitment
    Verify {
        /// The note as json, or `-` to read it from stdin
        note: String,
    },
}

impl Cli {
    pub fn run(self) -> eyre::Result<()> {
        let policy = NotePolicy::load(self.config.as_deref()).wrap_err("failed to load config")?;
        let stdout = io::stdout();

        self.command.execute(&policy, &mut stdout.lock())
    }
}

impl Command {
    pub fn execute(self, policy: &NotePolicy, out: &mut impl Write) -> eyre::Result<()> {
        match self {
            Self::Create {
                value,
                secret,
                pretty,
            } => {
                let note = match secret {
                    Some(secret) => policy.create_note(value, secret.as_bytes())?,
                    None => policy.generate_note(value)?,
                };

                if pretty {
                    let json = serde_json::to_string_pretty(&NoteJson::from(&note))?;
                    writeln!(out, "{json}")?;
                } else {
                    writeln!(out, "{}", to_json(&note))?;
                }
            }
            Self::Commit { value, secret } => {
                writeln!(out, "{}", commit(value, secret.as_bytes())?)?;
            }
            Self::Nullifier { note, secret } => {
                let note = policy.note_from_json(&read_arg(note)?)?;
                let secret = secret.as_ref().unwrap_or(note.secret());

                writeln!(out, "{}", generate_nullifier(&note, secret.as_bytes())?)?;
            }
            Self::Check { spent, nullifiers } => {
                let file = File::open(&spent)
                    .wrap_err_with(|| format!("failed to open {}", spent.display()))?;
                let spent = read_spent(BufReader::new(file))
                    .wrap_err_with(|| format!("failed to read {}", spent.display()))?;

                let results = check_multiple_nullifiers(&nullifiers, &spent);
                for (nullifier, is_spent) in nullifiers.iter().zip(results) {
                    let status = if is_spent { "spent" } else { "unspent" };
                    writeln!(out, "{nullifier} {status}")?;
                }
            }
            Self::Verify { note } => {
                let note = policy.note_from_json(&read_arg(note)?)?;

                if !note.verify() {
                    bail!("commitment does not match value and secret");
                }

                writeln!(out, "valid {}", note.commitment())?;
            }
        }

        Ok(())
    }
}

fn parse_secret(s: &str) -> Result<Secret, spark_note::Error> {
    Secret::from_hex(s)
}

fn read_arg(arg: String) -> eyre::Result<String> {
    if arg != "-" {
        return Ok(arg);
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .wrap_err("failed to read stdin")?;
    Ok(input)
}

fn read_spent(reader: impl BufRead) -> eyre::Result<HashSet<Nullifier>> {
    let mut spent = HashSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let nullifier: Nullifier = line
            .parse()
            .wrap_err_with(|| format!("invalid nullifier on line {}", i + 1))?;
        spent.insert(nullifier);
    }

    tracing::debug!(count = spent.len(), "read spent nullifiers");

    Ok(spent)
}
