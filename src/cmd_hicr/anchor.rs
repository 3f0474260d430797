use clap::*;
use hicr::libs::anchor::NodeGraph;
use hicr::libs::contig::Contigs;
use hicr::libs::error::HicError;
use hicr::libs::partition::Clusters;
use hicr::libs::tour;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("anchor")
        .about("Order and orient contigs into linear paths")
        .after_help(
            r###"
Builds a confidence graph over contig ends from end-pair Hi-C links and walks it
into linear paths. Cycles are broken at their weakest edge.

Input formats:
* contigs.tsv: name<TAB>length[<TAB>skip]
* ends.tsv:    name1<TAB>end1<TAB>name2<TAB>end2<TAB>count, end is 0 (head) or 1 (tail)

Output: one tour per path, `>PATH{i}` then `name+ name- ...`

Examples:
1. Anchor all contigs:
   hicr anchor contigs.tsv ends.tsv

2. Anchor the first cluster of `hicr cluster`:
   hicr anchor contigs.tsv ends.tsv --clusters clusters.txt --group 0 -o g0.tour

"###,
        )
        .arg(
            Arg::new("contigs")
                .required(true)
                .index(1)
                .help("Contig table"),
        )
        .arg(
            Arg::new("ends")
                .required(true)
                .index(2)
                .help("End-pair link counts. [stdin] for standard input"),
        )
        .arg(
            Arg::new("clusters")
                .long("clusters")
                .num_args(1)
                .help("Clusters file; restricts anchoring to one group"),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(usize))
                .help("Group index in the clusters file"),
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

/// Contigs, and the node graph over the selected contigs with their end links.
pub fn load_node_graph(args: &ArgMatches) -> anyhow::Result<(Contigs, NodeGraph)> {
    let contigs = Contigs::from_tsv(args.get_one::<String>("contigs").unwrap())?;

    let subset: Vec<usize> = match args.get_one::<String>("clusters") {
        Some(infile) => {
            let clusters = Clusters::from_reader(hicr::reader(infile)?, &contigs)?;
            let group = *args.get_one::<usize>("group").unwrap();
            clusters
                .get(group)
                .ok_or_else(|| {
                    HicError::Config(format!("group {} not in {} ({} groups)", group, infile, clusters.len()))
                })?
                .to_vec()
        }
        None => (0..contigs.len()).collect(),
    };

    let mut graph = NodeGraph::from_contigs(&contigs, &subset);
    graph.load_links(hicr::reader(args.get_one::<String>("ends").unwrap())?, &contigs)?;
    tracing::info!("Loaded {} units with {} linked ends", graph.paths().len(), graph.links().len());

    Ok((contigs, graph))
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let (contigs, graph) = load_node_graph(args)?;
    let tours = graph.anchor()?;

    let mut writer = hicr::writer(args.get_one::<String>("outfile").unwrap())?;
    tour::write_tours(&mut writer, &tours, &contigs)?;
    writer.flush()?;

    Ok(())
}
