//! Command-line surface of the build tool.

use clap::Parser;

use crate::options::BuildOptions;

pub const DEFAULT_PIPELINE: &str = "node scripts/lib/build_all.js";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "millwright-build", about = "Build the client and database payloads")]
pub struct Cli {
    /// Location of database backup file. Must be used with -i.
    #[arg(short = 'b', long, value_name = "/path/to/the.backup", num_args = 0..=1)]
    pub backup: Option<Option<String>>,

    /// Location of datasource config file [config.js].
    #[arg(short = 'c', long, value_name = "/path/to/alternate_config.js", num_args = 0..=1)]
    pub config: Option<Option<String>>,

    /// Use specific database [all databases in config file].
    #[arg(short = 'd', long, value_name = "database name", num_args = 0..=1)]
    pub database: Option<Option<String>>,

    /// Extension to build [core plus all extensions registered for the database].
    #[arg(short = 'e', long, value_name = "/path/to/extension", num_args = 0..=1)]
    pub extension: Option<Option<String>>,

    /// Initialize database. Must be used with -b.
    #[arg(short = 'i', long)]
    pub initialize: bool,

    /// Do not delete the temporary sql files that represent the payload of the build.
    #[arg(short = 'k', long)]
    pub keepsql: bool,

    /// Query the database directly, without delegating to psql.
    #[arg(short = 'q', long)]
    pub querydirect: bool,

    /// Unregister an extension.
    #[arg(short = 'u', long)]
    pub unregister: bool,

    /// Drop the views and the orm registrations pre-emptively.
    #[arg(short = 'w', long)]
    pub wipeviews: bool,

    /// Only rebuild the client.
    #[arg(short = 'y', long)]
    pub clientonly: bool,

    /// Only rebuild the database.
    #[arg(short = 'z', long)]
    pub databaseonly: bool,

    /// Program (and leading arguments) that performs the build.
    ///
    /// Split on whitespace with no quoting rules, so neither the program path
    /// nor its arguments may contain spaces.
    #[arg(long, env = "MILLWRIGHT_BUILD_PIPELINE", default_value = DEFAULT_PIPELINE, hide = true)]
    pub pipeline: String,
}

impl Cli {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            backup: self.backup.clone().map(Into::into),
            config: self.config.clone().map(Into::into),
            database: self.database.clone().map(Into::into),
            extension: self.extension.clone().map(Into::into),
            initialize: self.initialize,
            keep_sql: self.keepsql,
            query_direct: self.querydirect,
            unregister: self.unregister,
            wipe_views: self.wipeviews,
            client_only: self.clientonly,
            database_only: self.databaseonly,
        }
    }
}
