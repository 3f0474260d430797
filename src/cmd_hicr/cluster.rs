use clap::*;
use hicr::libs::contig::{ContactMatrix, Contigs};
use hicr::libs::partition::{self, ClusterOpt};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("cluster")
        .about("Group contigs into clusters by Hi-C linkage")
        .after_help(
            r###"
Hierarchical agglomerative clustering of contigs. The pair of clusters with the
highest average linkage (links divided by the product of cluster sizes) is merged
until K non-singleton clusters remain or no pair links above --min-linkage.

Input formats:
* contigs.tsv: name<TAB>length[<TAB>skip], skip is 0 or 1
* links.tsv:   name1<TAB>name2<TAB>count

Output: #Group<TAB>nContigs<TAB>Contigs, ordered by descending total length.

Notes:
* Skipped contigs never take part in merges
* --ratio 0 leaves skipped contigs out; a ratio > 1 attaches a skipped contig to its
  best cluster when it has at least that many times the links of the runner-up

Examples:
1. Cluster into 12 groups:
   hicr cluster contigs.tsv links.tsv -k 12 -o clusters.txt

2. Skip contigs shorter than 10 kb and recover them afterwards:
   hicr cluster contigs.tsv links.tsv -k 12 --min-len 10000 --ratio 3

"###,
        )
        .arg(
            Arg::new("contigs")
                .required(true)
                .index(1)
                .help("Contig table. [stdin] for standard input"),
        )
        .arg(
            Arg::new("links")
                .required(true)
                .index(2)
                .help("Contig-pair link counts"),
        )
        .arg(
            Arg::new("k")
                .short('k')
                .long("k")
                .required(true)
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Target number of clusters"),
        )
        .arg(
            Arg::new("min_linkage")
                .long("min-linkage")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(f64))
                .help("Minimum average linkage for a merge"),
        )
        .arg(
            Arg::new("min_len")
                .long("min-len")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(usize))
                .help("Skip contigs shorter than this"),
        )
        .arg(
            Arg::new("ratio")
                .long("ratio")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(f64))
                .help("Non-informative ratio for recovering skipped contigs"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opt = ClusterOpt {
        k: *args.get_one::<usize>("k").unwrap(),
        min_linkage: *args.get_one::<f64>("min_linkage").unwrap(),
        non_informative_ratio: *args.get_one::<f64>("ratio").unwrap(),
    };
    opt.validate()?;
    let min_len = *args.get_one::<usize>("min_len").unwrap();

    let mut contigs = Contigs::from_tsv(args.get_one::<String>("contigs").unwrap())?;
    if min_len > 0 {
        let n = contigs.skip_shorter(min_len);
        tracing::info!("Skipped {} contigs shorter than {}", n, min_len);
    }
    let matrix = ContactMatrix::from_tsv(args.get_one::<String>("links").unwrap(), &contigs)?;

    let clusters = partition::cluster(&matrix, &contigs, &opt)?;

    let mut writer = hicr::writer(args.get_one::<String>("outfile").unwrap())?;
    clusters.write_to(&mut writer, &contigs)?;
    writer.flush()?;

    Ok(())
}
