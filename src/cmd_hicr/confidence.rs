use clap::*;
use hicr::libs::anchor::{make_confidence_graph, End, NodeGraph, NodeId};
use hicr::libs::contig::Contigs;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("confidence")
        .about("Show the confidence edges between contig ends")
        .after_help(
            r###"
Prints the edges kept in the confidence graph, one directed edge per line:
name1<TAB>end1<TAB>name2<TAB>end2<TAB>confidence

An edge without any competitor has confidence `inf`.

Examples:
1. hicr confidence contigs.tsv ends.tsv

2. Within one cluster:
   hicr confidence contigs.tsv ends.tsv --clusters clusters.txt --group 1

"###,
        )
        .args(
            super::anchor::make_subcommand()
                .get_arguments()
                .cloned()
                .collect::<Vec<_>>(),
        )
}

fn unit_name(graph: &NodeGraph, contigs: &Contigs, id: NodeId) -> anyhow::Result<String> {
    let unit = graph.path_of(id)?;
    Ok(itertools::join(
        unit.contigs.iter().map(|&(idx, _)| contigs.name(idx)),
        ",",
    ))
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let (contigs, graph) = super::anchor::load_node_graph(args)?;
    let confidence_graph = make_confidence_graph(&graph, graph.links())?;

    let end_of = |id: NodeId| -> anyhow::Result<u8> {
        Ok(match graph.node(id)?.end {
            End::Head => 0,
            End::Tail => 1,
        })
    };

    let mut writer = hicr::writer(args.get_one::<String>("outfile").unwrap())?;
    for (&a, nb) in &confidence_graph {
        for (&b, &confidence) in nb {
            writer.write_fmt(format_args!(
                "{}\t{}\t{}\t{}\t{}\n",
                unit_name(&graph, &contigs, a)?,
                end_of(a)?,
                unit_name(&graph, &contigs, b)?,
                end_of(b)?,
                confidence
            ))?;
        }
    }
    writer.flush()?;

    Ok(())
}
