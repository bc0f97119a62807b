// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations CI runs, plus two database helpers:
//!
//! - `cargo xtask seed-catalog --database pumpquote.db` loads the stock
//!   price catalog (pipes, motors, wire, fixed items, bundles, labor rates)
//!   into a `SQLite` file. Rows whose name already exists are left alone, so
//!   re-running it is harmless.
//! - `cargo xtask verify-migrations` applies the embedded migrations to a
//!   scratch in-memory database, checks the resulting schema, then reverts
//!   and re-applies them to prove `down.sql` is sound.
//!
//! Standard `cargo test` needs none of this and stays infrastructure-free.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    fmt::Debug,
    io,
    path::{Path, PathBuf},
    process::Output,
    vec,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use pumpquote_domain::{parse_decimal, Decimal, LookupData, MaterialCategory};
use pumpquote_persistence::{NewLaborRate, NewMaterial, Persistence, PersistenceError};
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Tables the migrations must create.
const EXPECTED_TABLES: [&str; 7] = [
    "clients",
    "estimate_line_items",
    "estimates",
    "labor_rates",
    "materials",
    "settings",
    "sites",
];

/// `(table, column, referenced table)` triples the migrations must create.
const EXPECTED_FOREIGN_KEYS: [(&str, &str, &str); 4] = [
    ("sites", "client_id", "clients"),
    ("estimates", "client_id", "clients"),
    ("estimates", "site_id", "sites"),
    ("estimate_line_items", "estimate_id", "estimates"),
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check dependencies with cargo-deny
    #[command(visible_alias = "cd")]
    Deny,

    /// Look for unused dependencies with cargo-machete
    #[command(visible_alias = "m")]
    Machete,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check that docs build without errors
    #[command(visible_alias = "d")]
    LintDocs,

    /// Lint formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Load the stock price catalog into a database file
    #[command(visible_alias = "seed")]
    SeedCatalog {
        /// Path to the `SQLite` database file. Created if missing.
        #[arg(short, long)]
        database: PathBuf,
    },

    /// Apply, inspect, revert and re-apply the migrations on a scratch database
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::LintMarkdown => lint_markdown(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::SeedCatalog { database } => seed_catalog(&database),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs (and a soft fail on markdown)
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("markdownlint reported issues: {err}");
    }
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Lint markdown files using [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2)
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;

    Ok(())
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

// ============================================================================
// Catalog seeding
// ============================================================================

/// One stock material: name, category, price, unit, description, lookup.
type SeedMaterial = (
    &'static str,
    MaterialCategory,
    &'static str,
    &'static str,
    &'static str,
    Option<LookupSeed>,
);

/// Selection ranges of a stock material, as decimal strings.
#[derive(Clone, Copy)]
enum LookupSeed {
    Pipe(&'static str, &'static str, &'static str),
    Motor(&'static str, &'static str),
}

const SEED_MATERIALS: [SeedMaterial; 11] = [
    (
        "2\" Pipe",
        MaterialCategory::Pipe,
        "11.08",
        "ft",
        "2\" Schedule 40 PVC Pipe",
        Some(LookupSeed::Pipe("55", "70", "0.01")),
    ),
    (
        "2.5\" Pipe",
        MaterialCategory::Pipe,
        "11.08",
        "ft",
        "2.5\" Schedule 40 PVC Pipe",
        Some(LookupSeed::Pipe("71", "110", "0.075")),
    ),
    (
        "5 HP Motor",
        MaterialCategory::Motor,
        "2581.86",
        "each",
        "4\" Grundfos 5 HP motor",
        Some(LookupSeed::Motor("3.5", "5.5")),
    ),
    (
        "7.5 HP Motor",
        MaterialCategory::Motor,
        "3301.72",
        "each",
        "6\" Grundfos 7.5 HP motor",
        Some(LookupSeed::Motor("5.51", "7.75")),
    ),
    ("#14", MaterialCategory::Wire, "2.13", "ft", "#14 FJ wire", None),
    ("#12", MaterialCategory::Wire, "2.88", "ft", "#12 FJ wire", None),
    (
        "Concrete Pad",
        MaterialCategory::Concrete,
        "900.00",
        "each",
        "Standard concrete pad for well head",
        None,
    ),
    (
        "Sounding Tube",
        MaterialCategory::SoundingTube,
        "1.00",
        "ft",
        "1\" PVC Sounding Tube",
        None,
    ),
    (
        "Bundle A",
        MaterialCategory::Bundle,
        "1700.00",
        "each",
        "Submersible bundle A - sub discharge head. Duct tape, electrical splice connections, tape kit, etc.",
        None,
    ),
    (
        "Bundle B",
        MaterialCategory::Bundle,
        "1450.00",
        "each",
        "Submersible bundle B - well plate. Duct tape, electrical splice connections, tape kit, etc.",
        None,
    ),
    (
        "Bundle C",
        MaterialCategory::Bundle,
        "700.00",
        "each",
        "Submersible bundle C - reuse discharge head. Duct tape, electrical splice connections, tape kit, etc.",
        None,
    ),
];

/// Stock labor rates: name, rate per hour, description.
const SEED_LABOR_RATES: [(&str, &str, &str); 3] = [
    ("Prep Job Labor", "175.00", "Labor for job preparation"),
    (
        "Install Submersible Labor",
        "395.00",
        "Labor for installing submersible pump",
    ),
    (
        "Ag Sub Pump Startup Labor",
        "175.00",
        "Labor for agricultural submersible pump startup",
    ),
];

fn seed_decimal(field: &str, value: &str) -> Result<Decimal> {
    parse_decimal(field, value).map_err(|err| eyre!("bad seed value: {err}"))
}

fn seed_lookup(lookup: LookupSeed) -> Result<LookupData> {
    Ok(match lookup {
        LookupSeed::Pipe(gpm_min, gpm_max, friction_loss) => LookupData::Pipe {
            gpm_min: seed_decimal("gpmMin", gpm_min)?,
            gpm_max: seed_decimal("gpmMax", gpm_max)?,
            friction_loss: seed_decimal("frictionLoss", friction_loss)?,
        },
        LookupSeed::Motor(hp_min, hp_max) => LookupData::Motor {
            hp_min: seed_decimal("hpMin", hp_min)?,
            hp_max: seed_decimal("hpMax", hp_max)?,
        },
    })
}

/// Reports whether an insert went in, or skips a name that is already there.
fn seeded<T>(result: Result<T, PersistenceError>, name: &str) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(PersistenceError::DuplicateName { .. }) => {
            tracing::debug!("{name} already present, leaving it alone");
            Ok(false)
        }
        Err(err) => Err(eyre!("failed to seed {name}: {err}")),
    }
}

/// Load the stock catalog into a database file
fn seed_catalog(database: &Path) -> Result<()> {
    tracing::info!("Seeding catalog into {}", database.display());

    let mut persistence = Persistence::new_with_file(database)
        .map_err(|err| eyre!("failed to open {}: {err}", database.display()))?;

    let mut inserted_materials = 0_usize;
    for (name, category, price, unit, description, lookup) in SEED_MATERIALS {
        let material = NewMaterial {
            name: name.to_string(),
            category,
            description: Some(description.to_string()),
            unit: Some(unit.to_string()),
            price: seed_decimal("price", price)?,
            lookup_data: lookup.map(seed_lookup).transpose()?,
            is_active: true,
        };
        if seeded(persistence.create_material(&material), name)? {
            inserted_materials += 1;
        }
    }
    tracing::info!(
        "Materials seeded: {inserted_materials} new, {} already present",
        SEED_MATERIALS.len() - inserted_materials
    );

    let mut inserted_rates = 0_usize;
    for (name, rate_per_hour, description) in SEED_LABOR_RATES {
        let labor_rate = NewLaborRate {
            name: name.to_string(),
            description: Some(description.to_string()),
            rate_per_hour: seed_decimal("rate_per_hour", rate_per_hour)?,
            is_active: true,
        };
        if seeded(persistence.create_labor_rate(&labor_rate), name)? {
            inserted_rates += 1;
        }
    }
    tracing::info!(
        "Labor rates seeded: {inserted_rates} new, {} already present",
        SEED_LABOR_RATES.len() - inserted_rates
    );

    Ok(())
}

// ============================================================================
// Migration verification
// ============================================================================

/// Apply, inspect, revert and re-apply the migrations on a scratch database
///
/// Fails if a migration does not apply, an expected table or foreign key is
/// missing, a down migration leaves tables behind, or the migrations do not
/// apply cleanly a second time.
fn verify_migrations() -> Result<()> {
    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_schema(&schema)?;

    let still_pending = conn
        .has_pending_migration(MIGRATIONS)
        .map_err(|e| eyre!("Failed to check pending migrations: {e}"))?;
    if still_pending {
        return Err(eyre!("Migrations still pending after a full run"));
    }

    tracing::info!("Reverting all migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;

    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        let leftovers: Vec<&str> = reverted.tables.keys().map(String::as_str).collect();
        return Err(eyre!(
            "Down migrations left tables behind: {}",
            leftovers.join(", ")
        ));
    }

    tracing::info!("Re-applying migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;
    check_schema(&introspect_sqlite_schema(&mut conn)?)?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<UniqueConstraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueConstraint {
    columns: Vec<String>,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes.into_iter().filter(|idx| idx.origin == "u") {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info.unique_constraints.insert(UniqueConstraint {
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string()
    }
}

/// Check the migrated schema against the tables and relations the
/// persistence layer relies on
fn check_schema(schema: &Schema) -> Result<()> {
    let actual: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_TABLES.into_iter().collect();

    if actual != expected {
        let mut errors = Vec::new();
        for table in expected.difference(&actual) {
            errors.push(format!("  - Table '{table}' is missing"));
        }
        for table in actual.difference(&expected) {
            errors.push(format!("  - Table '{table}' is unexpected"));
        }
        return Err(eyre!(
            "❌ Schema check FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for (table_name, from_column, to_table) in EXPECTED_FOREIGN_KEYS {
        let table = &schema.tables[table_name];
        let found = table
            .foreign_keys
            .iter()
            .any(|fk| fk.from_column == from_column && fk.to_table == to_table);
        if !found {
            return Err(eyre!(
                "❌ Schema check FAILED: '{table_name}.{from_column}' does not reference '{to_table}'\n  Found: {:?}",
                table.foreign_keys
            ));
        }
    }

    for table_name in ["materials", "labor_rates"] {
        let table = &schema.tables[table_name];
        let unique_name = table
            .unique_constraints
            .iter()
            .any(|constraint| constraint.columns == ["name"]);
        if !unique_name {
            return Err(eyre!(
                "❌ Schema check FAILED: '{table_name}.name' is not unique\n  Found: {:?}",
                table.unique_constraints
            ));
        }
    }

    let estimates = &schema.tables["estimates"];
    let number_unique = estimates
        .unique_constraints
        .iter()
        .any(|constraint| constraint.columns == ["estimate_number"]);
    if !number_unique {
        return Err(eyre!(
            "❌ Schema check FAILED: 'estimates.estimate_number' is not unique"
        ));
    }

    for (table_name, table) in &schema.tables {
        if table.primary_keys.is_empty() {
            return Err(eyre!(
                "❌ Schema check FAILED: Table '{table_name}' has no primary key"
            ));
        }
        tracing::debug!(
            "{table_name}: {} column(s), {} text, {} nullable",
            table.columns.len(),
            table
                .columns
                .values()
                .filter(|c| c.normalized_type == "text")
                .count(),
            table.columns.values().filter(|c| c.nullable).count()
        );
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
