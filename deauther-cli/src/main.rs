use anyhow::{Context, Result};
use deauther_attack::channels;
use deauther_capture::{CaptureSink, HexDumpWriter};
use deauther_cli::{replay_dump, Cli, Commands, ReplayOptions};
use deauther_core::{Channel, DeautherConfig, ReasonCode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    let mut config = DeautherConfig::default();
    config.apply_params(&cli.command.params()?)?;

    match cli.command {
        Commands::Replay {
            input,
            mode,
            bssid,
            channel,
            ssid,
            reason,
            output,
            ..
        } => {
            let reader = BufReader::new(
                File::open(&input).with_context(|| format!("opening {}", input.display()))?,
            );
            let options = ReplayOptions {
                mode,
                bssid,
                channel: Channel::new(channel)?,
                ssid,
                reason: reason.map(ReasonCode::from),
                config,
            };

            let report = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    let report =
                        replay_dump(reader, options, HexDumpWriter::new(BufWriter::new(file)))
                            .await?;
                    info!(output = %path.display(), frames = report.frames_stored, "Captures written");
                    report
                }
                None => replay_dump(reader, options, DiscardSink).await?,
            };

            println!("{}", report);
        }
        Commands::Channels { .. } => {
            let mut stdout = io::stdout().lock();
            for channel in channels(config.channel_max) {
                writeln!(stdout, "{}", channel)?;
            }
        }
    }

    Ok(())
}

/// Sink for replays without an output file
struct DiscardSink;

impl CaptureSink for DiscardSink {
    fn write_frame(&mut self, _frame: &[u8]) -> deauther_core::Result<()> {
        Ok(())
    }
}
