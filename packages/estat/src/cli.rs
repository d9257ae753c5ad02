//! Command-line interface: one subcommand per service operation.
//!
//! Credentials and endpoint come from the environment (see
//! [`EstatConfig::from_env`]); the decoded envelope is printed as JSON.

use clap::{Args, Parser, Subcommand};
use console::style;
use serde::Serialize;

use crate::config::EstatConfig;
use crate::context::CallContext;
use crate::error::Result;
use crate::params::{
    Flag, GetDataCatalogParams, GetDatasetListParams, GetMetaInfoParams, GetStatsDataParams,
    GetStatsDatasParams, GetStatsListParams, Lang, NarrowingCondition, PostDatasetParams,
    ProcessMode, RefDatasetParams, StatsDatasSpec, WireKey,
};
use crate::response::{Envelope, ResponseResult};

/// estat - Query the e-Stat statistics API (REST 3.0).
#[derive(Parser)]
#[command(name = "estat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Response language, overrides ESTAT_LANG (J or E)
    #[arg(long, global = true)]
    pub lang: Option<Lang>,

    /// Log request URLs and payloads
    #[arg(long, global = true)]
    pub debug: bool,

    /// Give up after this many seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search statistics tables (getStatsList).
    StatsList(StatsListArgs),

    /// Show the classification metadata of a table (getMetaInfo).
    MetaInfo {
        /// Statistics table id (e.g., 0003109741)
        stats_data_id: String,

        #[arg(long)]
        explanation: Option<Flag>,
    },

    /// Fetch data values of a table (getStatsData).
    StatsData(StatsDataArgs),

    /// Fetch several tables in one request (getStatsDatas).
    StatsDatas(StatsDatasArgs),

    /// Register, update or delete a dataset (postDataset).
    PostDataset(PostDatasetArgs),

    /// Show one registered dataset (refDataset).
    RefDataset {
        /// Dataset id
        data_set_id: String,

        #[arg(long)]
        explanation: Option<Flag>,
    },

    /// List registered datasets (refDataset without an id).
    DatasetList {
        #[arg(long)]
        collect_area: Option<u8>,

        #[arg(long)]
        explanation: Option<Flag>,
    },

    /// Search the data catalog (getDataCatalog).
    DataCatalog(DataCatalogArgs),
}

#[derive(Args)]
pub struct StatsListArgs {
    /// Survey period: yyyy, yyyymm or yyyymm-yyyymm
    #[arg(long)]
    pub survey_years: Option<String>,

    #[arg(long)]
    pub open_years: Option<String>,

    #[arg(long)]
    pub stats_field: Option<String>,

    #[arg(long)]
    pub stats_code: Option<String>,

    #[arg(long)]
    pub search_word: Option<String>,

    #[arg(long)]
    pub search_kind: Option<u8>,

    #[arg(long)]
    pub collect_area: Option<u8>,

    #[arg(long)]
    pub explanation: Option<Flag>,

    /// List surveys instead of tables
    #[arg(long)]
    pub stats_name_list: bool,

    #[arg(long)]
    pub start_position: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub updated_date: Option<String>,
}

impl From<StatsListArgs> for GetStatsListParams {
    fn from(args: StatsListArgs) -> Self {
        Self {
            survey_years: args.survey_years,
            open_years: args.open_years,
            stats_field: args.stats_field,
            stats_code: args.stats_code,
            search_word: args.search_word,
            search_kind: args.search_kind,
            collect_area: args.collect_area,
            explanation_get_flg: args.explanation,
            stats_name_list: args.stats_name_list.then_some(Flag::Yes),
            start_position: args.start_position,
            limit: args.limit,
            updated_date: args.updated_date,
        }
    }
}

#[derive(Args)]
pub struct StatsDataArgs {
    /// Statistics table id
    #[arg(long, required_unless_present = "data_set_id")]
    pub stats_data_id: Option<String>,

    #[arg(long)]
    pub data_set_id: Option<String>,

    /// Narrowing condition as wire name and value (e.g., cdCat01=001)
    #[arg(long = "cond", value_name = "NAME=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<(WireKey, String)>,

    #[arg(long)]
    pub start_position: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub meta: Option<Flag>,

    #[arg(long)]
    pub count_only: Option<Flag>,

    #[arg(long)]
    pub explanation: Option<Flag>,

    #[arg(long)]
    pub annotation: Option<Flag>,

    #[arg(long)]
    pub replace_sp_char: Option<u8>,

    #[arg(long)]
    pub section_header_flg: Option<u8>,
}

#[derive(Args)]
pub struct StatsDatasArgs {
    /// Statistics table ids, in request order
    #[arg(long = "spec", value_name = "STATS_DATA_ID", required = true)]
    pub specs: Vec<String>,

    /// Narrowing applied to every table (e.g., cdTime=2020000000)
    #[arg(long = "cond", value_name = "NAME=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<(WireKey, String)>,

    #[arg(long)]
    pub start_position: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub meta: Option<Flag>,

    #[arg(long)]
    pub explanation: Option<Flag>,

    #[arg(long)]
    pub annotation: Option<Flag>,

    #[arg(long)]
    pub replace_sp_char: Option<u8>,

    #[arg(long)]
    pub section_header_flg: Option<u8>,

    #[arg(long)]
    pub data_set_id: Option<String>,
}

#[derive(Args)]
pub struct PostDatasetArgs {
    #[arg(long)]
    pub data_set_id: Option<String>,

    #[arg(long)]
    pub stats_data_id: Option<String>,

    #[arg(long = "cond", value_name = "NAME=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<(WireKey, String)>,

    /// Publish the dataset (true) or keep it private (false)
    #[arg(long)]
    pub open_specified: Option<bool>,

    /// E to register or update, D to delete
    #[arg(long)]
    pub process_mode: Option<ProcessMode>,

    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct DataCatalogArgs {
    #[arg(long)]
    pub survey_years: Option<String>,

    #[arg(long)]
    pub open_years: Option<String>,

    #[arg(long)]
    pub stats_field: Option<String>,

    #[arg(long)]
    pub stats_code: Option<String>,

    #[arg(long)]
    pub search_word: Option<String>,

    #[arg(long)]
    pub collect_area: Option<u8>,

    #[arg(long)]
    pub explanation: Option<Flag>,

    /// XLS, CSV, PDF, XML, XLS_REP or DB
    #[arg(long)]
    pub data_type: Option<String>,

    #[arg(long)]
    pub start_position: Option<u32>,

    #[arg(long)]
    pub catalog_id: Option<String>,

    #[arg(long)]
    pub resource_id: Option<String>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub updated_date: Option<String>,
}

impl From<DataCatalogArgs> for GetDataCatalogParams {
    fn from(args: DataCatalogArgs) -> Self {
        Self {
            survey_years: args.survey_years,
            open_years: args.open_years,
            stats_field: args.stats_field,
            stats_code: args.stats_code,
            search_word: args.search_word,
            collect_area: args.collect_area,
            explanation_get_flg: args.explanation,
            data_type: args.data_type,
            start_position: args.start_position,
            catalog_id: args.catalog_id,
            resource_id: args.resource_id,
            limit: args.limit,
            updated_date: args.updated_date,
        }
    }
}

/// Parse one `--cond NAME=VALUE` argument.
fn parse_condition(arg: &str) -> std::result::Result<(WireKey, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    Ok((name.trim().parse()?, value.trim().to_string()))
}

fn narrowing_from(conditions: Vec<(WireKey, String)>) -> NarrowingCondition {
    let mut narrowing = NarrowingCondition::new();
    for (key, value) in conditions {
        narrowing.set(key, value);
    }
    narrowing
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = EstatConfig::from_env()?;
    if let Some(lang) = cli.lang {
        config.lang = Some(lang);
    }
    config.debug |= cli.debug;
    let client = config.build_client()?;

    let mut ctx = CallContext::new();
    if let Some(secs) = cli.deadline_secs {
        ctx = ctx.with_timeout(std::time::Duration::from_secs(secs));
    }

    match cli.command {
        Commands::StatsList(args) => {
            let params = GetStatsListParams::from(args);
            print_envelope(&client.get_stats_list(&ctx, &params).await?)
        }
        Commands::MetaInfo {
            stats_data_id,
            explanation,
        } => {
            let params = GetMetaInfoParams {
                stats_data_id,
                explanation_get_flg: explanation,
            };
            print_envelope(&client.get_meta_info(&ctx, &params).await?)
        }
        Commands::StatsData(args) => {
            let params = GetStatsDataParams {
                data_set_id: args.data_set_id,
                stats_data_id: args.stats_data_id,
                narrowing: narrowing_from(args.conditions),
                start_position: args.start_position,
                limit: args.limit,
                meta_get_flg: args.meta,
                cnt_get_flg: args.count_only,
                explanation_get_flg: args.explanation,
                annotation_get_flg: args.annotation,
                replace_sp_char: args.replace_sp_char,
                section_header_flg: args.section_header_flg,
            };
            print_envelope(&client.get_stats_data(&ctx, &params).await?)
        }
        Commands::StatsDatas(args) => {
            let narrowing = narrowing_from(args.conditions);
            let specs: Vec<StatsDatasSpec> = args
                .specs
                .into_iter()
                .map(|id| StatsDatasSpec {
                    stats_data_id: id,
                    narrowing: narrowing.clone(),
                    start_position: args.start_position,
                    limit: args.limit,
                })
                .collect();
            let params = GetStatsDatasParams {
                data_set_id: args.data_set_id,
                meta_get_flg: args.meta,
                explanation_get_flg: args.explanation,
                annotation_get_flg: args.annotation,
                replace_sp_char: args.replace_sp_char,
                section_header_flg: args.section_header_flg,
            };
            print_envelope(&client.get_stats_datas(&ctx, &params, &specs).await?)
        }
        Commands::PostDataset(args) => {
            let params = PostDatasetParams {
                data_set_id: args.data_set_id,
                stats_data_id: args.stats_data_id,
                narrowing: narrowing_from(args.conditions),
                open_specified: args.open_specified,
                process_mode: args.process_mode,
                data_set_name: args.name,
            };
            print_envelope(&client.post_dataset(&ctx, &params).await?)
        }
        Commands::RefDataset {
            data_set_id,
            explanation,
        } => {
            let params = RefDatasetParams {
                data_set_id,
                explanation_get_flg: explanation,
            };
            print_envelope(&client.ref_dataset(&ctx, &params).await?)
        }
        Commands::DatasetList {
            collect_area,
            explanation,
        } => {
            let params = GetDatasetListParams {
                collect_area,
                explanation_get_flg: explanation,
            };
            print_envelope(&client.get_dataset_list(&ctx, &params).await?)
        }
        Commands::DataCatalog(args) => {
            let params = GetDataCatalogParams::from(args);
            print_envelope(&client.get_data_catalog(&ctx, &params).await?)
        }
    }
}

/// Print the envelope as JSON on stdout and the service status on stderr.
fn print_envelope<E: Envelope + Serialize>(envelope: &E) -> Result<()> {
    print_status(envelope.result());
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

fn print_status(result: &ResponseResult) {
    let status = if result.is_success() {
        style(format!("status {}", result.status)).green().bold()
    } else if result.is_error() {
        style(format!("status {}", result.status)).red().bold()
    } else {
        style(format!("status {}", result.status)).yellow().bold()
    };
    eprintln!("{status} {}", result.error_msg);
}
