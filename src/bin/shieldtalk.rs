//! ShieldTalk CLI: run the bridge operations from a shell for interop debugging.
//!
//! Binary values (keys, wrapped keys) are read and printed as base64.

#![forbid(unsafe_code)]

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shieldtalk_core::{encoding, Bridge, BridgeConfig, CipherSuite};

#[derive(Parser, Debug)]
#[command(name = "shieldtalk")]
#[command(about = "ShieldTalk hybrid encryption tools")]
struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cipher suite (standard or legacy), overrides config and SHIELDTALK_SUITE
    #[arg(short, long, global = true)]
    suite: Option<CipherSuite>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an RSA-2048 key pair (private key first, then public key)
    Keygen,

    /// Generate a random 256-bit symmetric key
    Symkey,

    /// Wrap a symmetric key under a public key
    Wrap {
        /// Symmetric key (base64)
        #[arg(short, long)]
        key: String,
        /// SubjectPublicKeyInfo DER public key (base64)
        #[arg(short, long)]
        public_key: String,
    },

    /// Recover a wrapped symmetric key
    Unwrap {
        /// Wrapped key (base64)
        #[arg(short, long)]
        wrapped: String,
        /// PKCS#8 DER private key (base64)
        #[arg(short = 'p', long)]
        private_key: String,
    },

    /// Encrypt a message
    Encrypt {
        /// Symmetric key (base64)
        #[arg(short, long)]
        key: String,
        message: String,
    },

    /// Decrypt a base64 ciphertext
    Decrypt {
        /// Symmetric key (base64)
        #[arg(short, long)]
        key: String,
        ciphertext: String,
    },

    /// Dispatch a JSON method call and print the JSON response
    Call {
        /// Method call JSON, or `-` to read it from stdin
        #[arg(default_value = "-")]
        request: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<BridgeConfig> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::from_env()?,
    };
    if let Some(suite) = args.suite {
        config.suite = suite;
    }
    Ok(config)
}

fn decode_arg(name: &str, value: &str) -> Result<Vec<u8>> {
    encoding::decode(value).with_context(|| format!("--{name} is not valid base64"))
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let bridge = Bridge::new(load_config(&args)?);

    match args.command {
        Command::Keygen => {
            let keys = bridge.generate_keys()?;
            for key in keys {
                println!("{key}");
            }
        }
        Command::Symkey => {
            println!("{}", encoding::encode(bridge.generate_symmetric_key()?));
        }
        Command::Wrap { key, public_key } => {
            let key = decode_arg("key", &key)?;
            let public_key = decode_arg("public-key", &public_key)?;
            println!("{}", encoding::encode(bridge.encrypt_key(&key, &public_key)?));
        }
        Command::Unwrap {
            wrapped,
            private_key,
        } => {
            let wrapped = decode_arg("wrapped", &wrapped)?;
            let private_key = decode_arg("private-key", &private_key)?;
            println!("{}", encoding::encode(bridge.decrypt_key(&wrapped, &private_key)?));
        }
        Command::Encrypt { key, message } => {
            let key = decode_arg("key", &key)?;
            println!("{}", bridge.encrypt_message(&key, &message)?);
        }
        Command::Decrypt { key, ciphertext } => {
            let key = decode_arg("key", &key)?;
            println!("{}", bridge.decrypt_message(&key, &ciphertext)?);
        }
        Command::Call { request } => {
            let request = if request == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read method call from stdin")?;
                buf
            } else {
                request
            };
            println!("{}", shieldtalk_core::dispatch_json(&bridge, &request));
        }
    }

    Ok(())
}
