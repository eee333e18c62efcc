// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::process::exit;

use clap::Parser;
use tokio::spawn;

use crate::cmd::check::check_bank;
use crate::cmd::parse::run_parse;
use crate::cmd::serve::server::ServeConfig;
use crate::cmd::serve::server::start_server;
use crate::error::Fallible;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Parse a raw quiz export into the question bank.
    Parse {
        /// Path to the raw export file. By default, standard input is read.
        #[arg(long = "in", short = 'i')]
        input: Option<String>,
        /// Path to the bank file to write.
        #[arg(long = "out", short = 'o', default_value = "public/questions.json")]
        output: String,
        /// Concatenate the new records after an existing bank instead of overwriting it.
        #[arg(long)]
        append: bool,
    },
    /// Check the integrity of a question bank.
    Check {
        /// Path to the bank file.
        #[arg(default_value = "public/questions.json")]
        path: String,
    },
    /// Serve a directory containing the question bank over HTTP.
    Serve {
        /// Path to the directory to serve. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Parse {
            input,
            output,
            append,
        } => run_parse(input, output, append),
        Command::Check { path } => check_bank(&path),
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServeConfig {
                directory,
                host,
                port,
            };
            start_server(config).await
        }
    }
}
