extern crate clap;
use clap::*;

mod cmd_hicr;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = Command::new("hicr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`hicr` - Hi-C contig clustering and scaffold anchoring")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_hicr::cluster::make_subcommand())
        .subcommand(cmd_hicr::anchor::make_subcommand())
        .subcommand(cmd_hicr::confidence::make_subcommand())
        .after_help(
            r###"Subcommands:

* cluster    - Group contigs into chromosome-scale clusters
* anchor     - Order and orient contigs into linear paths
* confidence - Show the confidence edges between contig ends

Log verbosity follows RUST_LOG, e.g. `RUST_LOG=debug hicr cluster ...`

"###,
        );

    match app.get_matches().subcommand() {
        Some(("cluster", sub_matches)) => cmd_hicr::cluster::execute(sub_matches),
        Some(("anchor", sub_matches)) => cmd_hicr::anchor::execute(sub_matches),
        Some(("confidence", sub_matches)) => cmd_hicr::confidence::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
