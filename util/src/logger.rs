// Copyright 2026 Tromp Core Contributors
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

//! Minimal logging setup for binaries and tests that embed `tromp_core`.
//! The consensus crate itself never calls `init_logger` - only the process
//! that owns stdout/the log file should initialize the global logger.

use std::sync::Mutex;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::types::{LogLevel, LoggingConfig};

const LOGGING_PATTERN: &str = "{d(%Y%m%d %H:%M:%S%.3f)} {h({l})} {M} - {m}{n}";

lazy_static! {
	static ref WAS_INIT: Mutex<bool> = Mutex::new(false);
}

fn convert_log_level(level: &LogLevel) -> LevelFilter {
	match *level {
		LogLevel::Error => LevelFilter::Error,
		LogLevel::Warning => LevelFilter::Warn,
		LogLevel::Info => LevelFilter::Info,
		LogLevel::Debug => LevelFilter::Debug,
		LogLevel::Trace => LevelFilter::Trace,
	}
}

/// Initializes the global logger from the given configuration (or the
/// default if none is supplied). Safe to call more than once; only the
/// first call takes effect.
pub fn init_logger(config: Option<LoggingConfig>) {
	let mut was_init = WAS_INIT.lock().unwrap();
	if *was_init {
		return;
	}

	let config = config.unwrap_or_default();
	let mut root_builder = Root::builder();
	let mut config_builder = Config::builder();

	if config.log_to_stdout {
		let stdout = ConsoleAppender::builder()
			.encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
			.build();
		config_builder =
			config_builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
		root_builder = root_builder.appender("stdout");
	}

	if config.log_to_file {
		if let Ok(file) = FileAppender::builder()
			.encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
			.build(&config.log_file_path)
		{
			config_builder =
				config_builder.appender(Appender::builder().build("file", Box::new(file)));
			root_builder = root_builder.appender("file");
		}
	}

	let level = convert_log_level(&config.stdout_log_level)
		.max(convert_log_level(&config.file_log_level));
	if let Ok(log_config) = config_builder.build(root_builder.build(level)) {
		let _ = log4rs::init_config(log_config);
	}

	*was_init = true;
}
