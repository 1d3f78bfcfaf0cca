use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::{Input, Select};

use crate::config::{self, SourceConfig};
use crate::core::cover::COVER_SIZE;
use crate::core::resolver::AudioTrack;
use crate::models::TrackRecord;
use crate::sources::http::HttpSource;
use crate::sources::MetadataSource;

#[derive(Parser)]
#[command(name = "evtrack", about = "Resolve album manifest metadata for local audio files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the album and tracks in the manifest
    Tracks {
        /// Manifest URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },
    /// Resolve the metadata for one local file
    Resolve {
        /// Local audio file; it does not need to exist
        file: PathBuf,
        #[arg(long)]
        url: Option<String>,
        /// Text appended to the track title
        #[arg(long)]
        append: Option<String>,
        /// Track number to bind; prompts when omitted
        #[arg(long)]
        track: Option<i64>,
    },
    /// Set the default manifest URL and append text
    Config,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Tracks { url }) => cmd_tracks(url),
        Some(Commands::Resolve {
            file,
            url,
            append,
            track,
        }) => cmd_resolve(&file, url, append, track),
        Some(Commands::Config) => cmd_config(),
        None => {
            println!("usage: evtrack <command>");
            println!("run `evtrack --help` for details.");
            Ok(())
        }
    }
}

fn cmd_tracks(url: Option<String>) -> Result<()> {
    let cfg = config::load_config();
    let url = url.unwrap_or_else(|| cfg.source.metadata_url().to_string());

    let source = HttpSource::new()?;
    let manifest = source
        .fetch_manifest(&url)
        .with_context(|| format!("failed to load manifest from {url}"))?;

    let album = manifest.metadata();
    println!("{} - {} ({})", album.artist_name, album.album_name, album.year);
    println!("album artist: {}", album.album_artist);
    println!("genre: {}", album.genre);
    if !album.cover_art_url.is_empty() {
        println!("cover: {}", album.cover_art_url);
    }

    let tracks = manifest.tracks();
    if tracks.is_empty() {
        println!("\nthe manifest lists no tracks");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "File URL", "Instrumental URL"]);
    for track in &tracks {
        table.add_row(vec![
            Cell::new(track.track_number()),
            Cell::new(track.track_name()),
            Cell::new(track.file_url()),
            Cell::new(track.inst_url()),
        ]);
    }

    println!("\n{table}");
    println!("\n{} tracks", tracks.len());
    Ok(())
}

fn cmd_resolve(
    file: &PathBuf,
    url: Option<String>,
    append: Option<String>,
    track_number: Option<i64>,
) -> Result<()> {
    let cfg = config::load_config();
    let url = url.unwrap_or_else(|| cfg.source.metadata_url().to_string());
    let append = append.unwrap_or_else(|| cfg.source.append_text().to_string());

    let source = HttpSource::new()?;
    let mut track = AudioTrack::fetch(&source, &file.to_string_lossy(), &url, &append)
        .with_context(|| format!("failed to resolve metadata from {url}"))?;

    let record = match track_number {
        Some(n) => track
            .track_by_number(n)
            .cloned()
            .with_context(|| format!("track {n} is not in the manifest"))?,
        None => match select_track(track.tracks())? {
            Some(record) => record,
            None => {
                println!("skipped.");
                return Ok(());
            }
        },
    };

    track.bind_track(record);
    print_resolved(&track);
    Ok(())
}

/// Prompts for one of the manifest tracks. `None` when the user skips.
fn select_track(tracks: &[TrackRecord]) -> Result<Option<TrackRecord>> {
    if tracks.is_empty() {
        anyhow::bail!("the manifest lists no tracks");
    }

    let mut items: Vec<String> = tracks
        .iter()
        .map(|t| format!("{:02}. {}", t.track_number(), t.track_name()))
        .collect();
    items.push("skip".to_string());

    let selection = Select::new()
        .with_prompt("select the track for this file")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(tracks.get(selection).cloned())
}

fn print_resolved(track: &AudioTrack) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);

    let mut row = |field: &str, value: String| {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    };

    row("filename", track.filename.clone());
    row("metadata_url", track.metadata_url.clone());
    row("append_text", track.append_text.clone());
    row("file_extension", track.file_extension().to_string());
    row("file_format", track.file_format().to_string());
    row("is_instrumental", track.is_instrumental().to_string());

    if let Some(bound) = track.binding() {
        row("track_number", bound.track_number.to_string());
        row("track_name", bound.track_name.clone());
        row("track_title", bound.track_title.clone());
        row("artist_name", bound.artist_name.clone());
        row("album_name", bound.album_name.clone());
        row("album_artist", bound.album_artist.clone());
        row("genre", bound.genre.clone());
        row("year", bound.year.clone());
        row("file_url", bound.file_url.clone());
        row("inst_url", bound.inst_url.clone());
        row("url", bound.url.clone());
    }

    let cover = match track.cover_data() {
        Some(data) => format!("{COVER_SIZE}x{COVER_SIZE} JPEG, {} bytes", data.len()),
        None => "none".to_string(),
    };
    row("cover", cover);

    println!("{table}");
    if let Some(bound) = track.binding() {
        println!("\n{}", bound.summary());
    }
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_config();

    println!("evtrack settings\n");

    let metadata_url: String = Input::new()
        .with_prompt("Manifest URL")
        .with_initial_text(cfg.source.metadata_url())
        .interact_text()?;

    let append_text: String = Input::new()
        .with_prompt("Append to titles")
        .with_initial_text(cfg.source.append_text())
        .allow_empty(true)
        .interact_text()?;

    cfg.source = SourceConfig {
        metadata_url: Some(metadata_url),
        append_text: Some(append_text),
    };

    let path = config::save_config(&cfg)?;
    println!("\nsaved to {}", path.display());
    Ok(())
}
