//! crypto-bridge CLI - derive keys, digest, encrypt and decrypt from a shell
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};

use bridge_core::{
    CryptoBridge, DecryptOptions, EncryptOptions, EncryptedDataEncoding, HashEncoding, Md5Input,
    Payload, PlainDataEncoding, Salt, Settings,
};

/// Crypto bridge - AES-256-GCM, MD5 and PBKDF2 with encoding negotiation
#[derive(Parser, Debug)]
#[command(name = "crypto-bridge")]
#[command(author = "Symbia Labs")]
#[command(version = "0.1.0")]
#[command(about = "Crypto bridge - encoding-aware AES-256-GCM, MD5 and PBKDF2")]
struct Args {
    /// JSON settings file
    #[arg(long, global = true, env = "CRYPTO_BRIDGE_SETTINGS")]
    settings: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a key string from a password (PBKDF2-HMAC-SHA512)
    DeriveKey {
        #[arg(long, env = "CRYPTO_BRIDGE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Salt as hex
        #[arg(long)]
        salt: String,

        #[arg(long, default_value = "10000")]
        iterations: u32,
    },

    /// MD5 digest of base64 content
    Md5 {
        /// Content as base64 (or UTF-8 text with --utf8)
        #[arg(long)]
        content: String,

        /// Treat content as UTF-8 text instead of base64
        #[arg(long)]
        utf8: bool,

        #[arg(long, default_value = "base64")]
        encoding: HashEncoding,
    },

    /// Encrypt data, printing the encrypted data object
    Encrypt {
        #[arg(long, env = "CRYPTO_BRIDGE_KEY", hide_env_values = true)]
        key: String,

        #[arg(long)]
        data: String,

        /// How --data is interpreted (utf8, binary, base64)
        #[arg(long, default_value = "utf8")]
        input_encoding: PlainDataEncoding,

        /// Encoding of the output content (base64, hex, binary, utf8); raw bytes if omitted
        #[arg(long)]
        output_encoding: Option<EncryptedDataEncoding>,
    },

    /// Decrypt an encrypted data object given as JSON
    Decrypt {
        #[arg(long, env = "CRYPTO_BRIDGE_KEY", hide_env_values = true)]
        key: String,

        /// Encrypted data object as JSON
        #[arg(long)]
        data: String,

        /// Encoding of the content field when it is a string
        #[arg(long)]
        input_encoding: Option<EncryptedDataEncoding>,

        /// Form of the plaintext (utf8, binary, base64)
        #[arg(long, default_value = "utf8")]
        output_encoding: PlainDataEncoding,
    },
}

fn load_settings(path: Option<&std::path::Path>) -> Result<Settings> {
    let Some(path) = path else {
        debug!("No settings file given, using defaults");
        return Ok(Settings::new());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {:?}", path))?;
    let settings = Settings::from_json(&contents)?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = load_settings(args.settings.as_deref())?;
    let bridge = CryptoBridge::with_settings(settings)?;

    match args.command {
        Command::DeriveKey {
            password,
            salt,
            iterations,
        } => {
            let key = bridge
                .derive_key(&password, Salt::Hex(salt), iterations)
                .await
                .context("Key derivation failed")?;
            print_json(&Value::String(key))?;
        }
        Command::Md5 {
            content,
            utf8,
            encoding,
        } => {
            let input = if utf8 {
                Md5Input::Utf8(content)
            } else {
                Md5Input::Base64(content)
            };
            let digest = bridge
                .calc_md5_hash(input, encoding)
                .await
                .context("Digest failed")?;
            print_json(&Value::String(digest))?;
        }
        Command::Encrypt {
            key,
            data,
            input_encoding,
            output_encoding,
        } => {
            let options = EncryptOptions {
                output_encoding,
                input_encoding,
            };
            let encrypted = bridge
                .encrypt(&key, Payload::Text(data), options)
                .await
                .context("Encryption failed")?;
            print_json(&encrypted)?;
        }
        Command::Decrypt {
            key,
            data,
            input_encoding,
            output_encoding,
        } => {
            let data: Value =
                serde_json::from_str(&data).context("--data is not valid JSON")?;
            let options = DecryptOptions {
                output_encoding,
                input_encoding,
            };
            let plain = bridge
                .decrypt_value(
                    &Value::String(key),
                    &data,
                    &serde_json::to_value(options)?,
                )
                .await
                .context("Decryption failed")?;
            print_json(&plain)?;
        }
    }

    Ok(())
}
