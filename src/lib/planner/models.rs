use std::path::PathBuf;

use clap::{command, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use super::list_view::SortMode;

pub mod api_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains the address of the inspection API and request timeout.
/// 2. Whether every confirmation popup is answered `Yes` without asking.
/// 3. The page flow to run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(short, long)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick teacher, subject, lesson and team, then save the inspection term
    Plan {
        #[arg(long)]
        teacher: u32,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        lesson: u32,
        #[arg(long)]
        team: u32,
    },
    /// List inspection terms
    Terms {
        #[arg(long, value_enum, default_value_t = SortMode::New)]
        sort: SortMode,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a term that has not been conducted yet
    DeleteTerm { id: u32 },
    /// List inspection documents
    Documents {
        #[arg(long, value_enum, default_value_t = SortMode::New)]
        sort: SortMode,
        #[arg(long)]
        name: Option<String>,
    },
    /// Rate an inspection document
    EditDocument {
        id: u32,
        #[arg(long)]
        lateness: Option<String>,
        #[arg(long)]
        attendance: Option<String>,
        #[arg(long)]
        room_adaptation: Option<String>,
        #[arg(long)]
        content_compatibility: Option<String>,
        #[arg(long)]
        substantive_assessment: Option<String>,
        #[arg(long)]
        final_assessment: Option<String>,
        #[arg(long)]
        recommendation: Option<String>,
    },
    /// Show inspection teams with their members
    Teams,
    /// Add a teacher to an inspection team
    AddMember { team: u32, teacher: u32 },
    /// Remove a teacher from an inspection team
    RemoveMember { team: u32, teacher: u32 },
    /// Show the inspection schedule of a semester
    Schedule {
        #[arg(long)]
        semester: Option<String>,
    },
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Base address of the inspection API
/// 2. Timeout applied to every request, in seconds
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    10
}
