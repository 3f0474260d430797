//! Hierarchical agglomerative clustering of contigs by average Hi-C linkage.
//!
//! Every informative contig starts in its own cluster. The pair of live
//! clusters with the highest average linkage (total links divided by the
//! product of cluster sizes) is merged repeatedly, until the number of
//! non-singleton clusters reaches the target or no candidate merge is left.
//!
//! Cluster ids follow a fixed scheme: singletons use the contig index, and the
//! `m`-th merge (0-based) creates cluster `N + m`. Ids are never reused; a
//! consumed cluster is only flagged as non-existent.

use crate::libs::contig::{ContactMatrix, Contigs};
use crate::libs::error::HicError;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::io::{BufRead, Write};

/// Default threshold on linkage for a pair to become a merge candidate.
pub const MIN_AVG_LINKAGE: f64 = 0.0;

/// Options of the clusterer.
#[derive(Debug, Clone)]
pub struct ClusterOpt {
    /// Target number of clusters
    pub k: usize,
    /// Candidates need a linkage strictly above this value
    pub min_linkage: f64,
    /// 0 disables the recovery of skipped contigs; otherwise a skipped contig joins
    /// the best cluster when it has at least this many times the runner-up's links
    pub non_informative_ratio: f64,
}

impl Default for ClusterOpt {
    fn default() -> Self {
        Self {
            k: 1,
            min_linkage: MIN_AVG_LINKAGE,
            non_informative_ratio: 0.0,
        }
    }
}

impl ClusterOpt {
    pub fn validate(&self) -> Result<(), HicError> {
        if self.k == 0 {
            return Err(HicError::Config(
                "the target number of clusters must be positive".to_string(),
            ));
        }
        if !(self.min_linkage >= 0.0) {
            return Err(HicError::Config(format!(
                "min linkage must be a nonnegative number, got {}",
                self.min_linkage
            )));
        }
        let ratio = self.non_informative_ratio;
        if !(ratio == 0.0 || ratio > 1.0) {
            return Err(HicError::Config(format!(
                "non-informative ratio needs to be either 0 or > 1, got {}",
                ratio
            )));
        }
        Ok(())
    }
}

/// A potential merge of two live clusters.
#[derive(Debug, Clone)]
struct Candidate {
    a: usize,
    b: usize,
    score: f64,
    /// Insertion order, earlier wins ties
    seq: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// A merge that has been carried out.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub a: usize,
    pub b: usize,
    pub new_id: usize,
    pub score: f64,
    /// Size of the new cluster
    pub size: usize,
}

/// Mutable clustering state over one contact matrix.
pub struct Partitioner<'a> {
    matrix: &'a ContactMatrix,
    opt: ClusterOpt,
    /// Cluster of each contig, `None` iff the contig is skipped
    cluster_id: Vec<Option<usize>>,
    cluster_size: Vec<usize>,
    cluster_exists: Vec<bool>,
    non_singletons: usize,
    merges: Vec<Merge>,
    queue: BinaryHeap<Candidate>,
    seq: usize,
}

impl<'a> Partitioner<'a> {
    pub fn new(matrix: &'a ContactMatrix, skip: &[bool], opt: ClusterOpt) -> Result<Self, HicError> {
        opt.validate()?;
        let n = matrix.size();
        if skip.len() != n {
            return Err(HicError::Integrity(format!(
                "{} skip flags for a matrix of {} contigs",
                skip.len(),
                n
            )));
        }

        let mut cluster_id = vec![None; n];
        let mut cluster_size = vec![0; 2 * n];
        let mut cluster_exists = vec![false; 2 * n];
        for (i, &s) in skip.iter().enumerate() {
            if s {
                continue;
            }
            cluster_id[i] = Some(i);
            cluster_size[i] = 1;
            cluster_exists[i] = true;
        }

        Ok(Self {
            matrix,
            opt,
            cluster_id,
            cluster_size,
            cluster_exists,
            non_singletons: 0,
            merges: Vec::new(),
            queue: BinaryHeap::new(),
            seq: 0,
        })
    }

    fn push_candidate(&mut self, a: usize, b: usize, score: f64) {
        self.queue.push(Candidate {
            a: a.min(b),
            b: a.max(b),
            score,
            seq: self.seq,
        });
        self.seq += 1;
    }

    fn is_live(&self, c: &Candidate) -> bool {
        self.cluster_exists[c.a] && self.cluster_exists[c.b]
    }

    /// Seeds candidates with the raw link counts of informative contig pairs.
    fn seed(&mut self) {
        let n = self.matrix.size();
        for i in 0..n {
            if self.cluster_id[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if self.cluster_id[j].is_none() {
                    continue;
                }
                let score = self.matrix.get(i, j) as f64;
                if score > self.opt.min_linkage {
                    self.push_candidate(i, j, score);
                }
            }
        }
    }

    /// Pops stale entries and returns the best live candidate.
    fn pop_best(&mut self) -> Option<Candidate> {
        while let Some(c) = self.queue.pop() {
            if self.is_live(&c) {
                return Some(c);
            }
        }
        None
    }

    /// Merges the two clusters of `best` and queues candidates for the new cluster.
    fn merge(&mut self, best: Candidate) -> Merge {
        let n = self.matrix.size();
        let new_id = n + self.merges.len();

        self.cluster_exists[best.a] = false;
        self.cluster_exists[best.b] = false;
        self.cluster_exists[new_id] = true;
        self.cluster_size[new_id] = self.cluster_size[best.a] + self.cluster_size[best.b];

        // +1 per singleton consumed, -1 for the two clusters becoming one
        if best.a < n {
            self.non_singletons += 1;
        }
        if best.b < n {
            self.non_singletons += 1;
        }
        self.non_singletons -= 1;

        let mut new_members = Vec::new();
        for (i, cid) in self.cluster_id.iter_mut().enumerate() {
            if *cid == Some(best.a) || *cid == Some(best.b) {
                *cid = Some(new_id);
                new_members.push(i);
            }
        }

        let merge = Merge {
            a: best.a,
            b: best.b,
            new_id,
            score: best.score,
            size: self.cluster_size[new_id],
        };
        self.merges.push(merge.clone());

        self.add_linkages(new_id, &new_members);
        merge
    }

    /// Average linkage between `new_id` and every other live cluster.
    fn add_linkages(&mut self, new_id: usize, new_members: &[usize]) {
        let n = self.matrix.size();
        let matrix = self.matrix;
        let cluster_id = &self.cluster_id;

        // Read-only over the matrix, one private sum per contig
        let per_contig: Vec<u64> = (0..n)
            .into_par_iter()
            .map(|i| match cluster_id[i] {
                Some(cid) if cid != new_id => new_members
                    .iter()
                    .map(|&j| matrix.get(i, j) as u64)
                    .sum::<u64>(),
                _ => 0,
            })
            .collect();

        let mut total_by_cluster = vec![0u64; 2 * n];
        for (i, links) in per_contig.into_iter().enumerate() {
            if let Some(cid) = self.cluster_id[i] {
                if cid != new_id {
                    total_by_cluster[cid] += links;
                }
            }
        }

        let new_size = self.cluster_size[new_id] as f64;
        for (cid, &total) in total_by_cluster.iter().enumerate() {
            if total == 0 {
                continue;
            }
            if !self.cluster_exists[cid] {
                tracing::error!("Cluster {} does not exist", cid);
                debug_assert!(false, "contig assigned to consumed cluster {}", cid);
                continue;
            }
            let avg = total as f64 / self.cluster_size[cid] as f64 / new_size;
            if avg > self.opt.min_linkage {
                self.push_candidate(cid, new_id, avg);
            }
        }
    }

    /// Runs the merge loop to completion.
    pub fn run(&mut self) {
        let n = self.matrix.size();
        let n_informative = self.cluster_id.iter().filter(|c| c.is_some()).count();
        if n_informative == 0 {
            tracing::info!(
                "There are no informative contigs for clustering. Contigs are either SHORT or REPETITIVE."
            );
        }
        tracing::info!(
            "Clustering starts with {} ({} informative) contigs with target of {} clusters",
            n,
            n_informative,
            self.opt.k
        );

        self.seed();

        loop {
            let best = match self.pop_best() {
                Some(best) => best,
                None => {
                    tracing::info!("No more merges to do since the queue is empty");
                    break;
                }
            };

            let merge = self.merge(best);
            tracing::debug!(
                "Merge #{}: Clusters\t{} + {} -> {}, Linkage = {}",
                self.merges.len(),
                merge.a,
                merge.b,
                merge.new_id,
                merge.score
            );

            if self.merges.len() > n / 2 && self.non_singletons <= self.opt.k {
                if self.non_singletons == self.opt.k {
                    tracing::info!(
                        "{} merges made so far; this leaves {} clusters, and so we're done!",
                        self.merges.len(),
                        self.non_singletons
                    );
                    break;
                }
            }
        }
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn non_singletons(&self) -> usize {
        self.non_singletons
    }

    pub fn cluster_of(&self, contig: usize) -> Option<usize> {
        self.cluster_id[contig]
    }

    pub fn cluster_size(&self, cid: usize) -> usize {
        self.cluster_size[cid]
    }

    pub fn cluster_exists(&self, cid: usize) -> bool {
        self.cluster_exists[cid]
    }

    /// Candidates whose both clusters are still alive.
    #[cfg(test)]
    fn live_candidates(&self) -> Vec<(usize, usize, f64)> {
        self.queue
            .iter()
            .filter(|c| self.is_live(c))
            .map(|c| (c.a, c.b, c.score))
            .collect()
    }

    /// Members of every live cluster, keyed by cluster id.
    fn groups(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, cid) in self.cluster_id.iter().enumerate() {
            if let Some(cid) = cid {
                groups.entry(*cid).or_default().push(i);
            }
        }
        groups
    }

    /// Builds the final partition: recovers skipped contigs if enabled, then
    /// sorts clusters by descending total length.
    pub fn into_clusters(self, lengths: &[usize]) -> Clusters {
        let mut groups: Vec<Vec<usize>> = self.groups().into_values().collect();

        if self.opt.non_informative_ratio > 0.0 {
            let mut attached = vec![];
            for (i, cid) in self.cluster_id.iter().enumerate() {
                if cid.is_some() {
                    continue;
                }
                if let Some(g) = best_group(self.matrix, i, &groups, self.opt.non_informative_ratio) {
                    attached.push((g, i));
                }
            }
            tracing::info!("Recovered {} skipped contigs", attached.len());
            for (g, i) in attached {
                groups[g].push(i);
            }
            for group in groups.iter_mut() {
                group.sort_unstable();
            }
        }

        Clusters::sorted(groups, lengths)
    }
}

/// The group a skipped contig links to most, when it beats the runner-up by `ratio`.
fn best_group(matrix: &ContactMatrix, contig: usize, groups: &[Vec<usize>], ratio: f64) -> Option<usize> {
    let row = matrix.row(contig);
    let mut best: Option<(usize, u64)> = None;
    let mut second = 0u64;

    for (g, members) in groups.iter().enumerate() {
        let links: u64 = members.iter().map(|&j| row[j] as u64).sum();
        match best {
            Some((_, b)) if links <= b => second = second.max(links),
            Some((_, b)) => {
                second = b;
                best = Some((g, links));
            }
            None => best = Some((g, links)),
        }
    }

    match best {
        Some((g, links)) if links > 0 && links as f64 >= ratio * second as f64 => Some(g),
        _ => None,
    }
}

/// Clustering entry point.
///
/// ```
/// use hicr::libs::contig::{ContactMatrix, Contigs};
/// use hicr::libs::partition::{cluster, ClusterOpt};
///
/// let mut contigs = Contigs::new();
/// for name in ["a", "b", "c", "d"] {
///     contigs.push(name, 100, false).unwrap();
/// }
/// let mut matrix = ContactMatrix::new(4);
/// matrix.add(0, 1, 50);
/// matrix.add(2, 3, 40);
///
/// let opt = ClusterOpt { k: 2, ..Default::default() };
/// let clusters = cluster(&matrix, &contigs, &opt).unwrap();
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters.get(0), Some(&[0, 1][..]));
/// assert_eq!(clusters.get(1), Some(&[2, 3][..]));
/// ```
pub fn cluster(matrix: &ContactMatrix, contigs: &Contigs, opt: &ClusterOpt) -> Result<Clusters, HicError> {
    let mut partitioner = Partitioner::new(matrix, &contigs.skip_flags(), opt.clone())?;
    partitioner.run();
    Ok(partitioner.into_clusters(&contigs.lengths()))
}

/// Contig groups, ordered by descending total length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clusters {
    groups: Vec<Vec<usize>>,
    lengths: Vec<usize>,
}

impl Clusters {
    /// Sorts groups by descending total length, keeping the given order for ties.
    pub fn sorted(groups: Vec<Vec<usize>>, contig_lengths: &[usize]) -> Self {
        let mut with_len: Vec<(usize, Vec<usize>)> = groups
            .into_iter()
            .map(|g| (g.iter().map(|&i| contig_lengths[i]).sum(), g))
            .collect();
        with_len.sort_by(|a, b| b.0.cmp(&a.0));

        let (lengths, groups): (Vec<usize>, Vec<Vec<usize>>) = with_len.into_iter().unzip();
        Self { groups, lengths }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&[usize]> {
        self.groups.get(id).map(|g| g.as_slice())
    }

    /// Total length of cluster `id`
    pub fn length(&self, id: usize) -> usize {
        self.lengths[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(|g| g.as_slice())
    }

    /// Writes the clusters file: a header, then `g{id}<TAB>count<TAB>names`.
    pub fn write_to(&self, writer: &mut dyn Write, contigs: &Contigs) -> std::io::Result<()> {
        writer.write_all(b"#Group\tnContigs\tContigs\n")?;
        for (id, group) in self.groups.iter().enumerate() {
            let names = itertools::join(group.iter().map(|&i| contigs.name(i)), " ");
            writer.write_fmt(format_args!("g{}\t{}\t{}\n", id, group.len(), names))?;
        }
        Ok(())
    }

    /// Reads a clusters file back against a contig registry.
    pub fn from_reader(reader: Box<dyn BufRead>, contigs: &Contigs) -> anyhow::Result<Self> {
        let mut groups = vec![];
        for res in crate::libs::io::data_lines(reader) {
            let (line_no, line) = res?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                return Err(HicError::Parse {
                    line: line_no,
                    message: "expected group, count and contigs".to_string(),
                }
                .into());
            }

            let mut group = vec![];
            for name in fields[2].split_whitespace() {
                match contigs.index_of(name) {
                    Some(idx) => group.push(idx),
                    None => {
                        return Err(HicError::Integrity(format!(
                            "contig {} in group {} not found",
                            name, fields[0]
                        ))
                        .into())
                    }
                }
            }
            groups.push(group);
        }

        // The file is already ordered
        let lengths = groups
            .iter()
            .map(|g| g.iter().map(|&i| contigs.length(i)).sum())
            .collect();
        Ok(Self { groups, lengths })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_of(n: usize, links: &[(usize, usize, u32)]) -> ContactMatrix {
        let mut matrix = ContactMatrix::new(n);
        for &(i, j, c) in links {
            matrix.add(i, j, c);
        }
        matrix
    }

    fn contigs_of(lengths: &[usize], skip: &[bool]) -> Contigs {
        let mut contigs = Contigs::new();
        for (i, (&len, &s)) in lengths.iter().zip(skip).enumerate() {
            contigs.push(&format!("ctg{}", i), len, s).unwrap();
        }
        contigs
    }

    // Three strong pairs chained by weak links: 1-2 and 3-4
    fn chained_pairs() -> ContactMatrix {
        matrix_of(
            6,
            &[(0, 1, 100), (1, 2, 1), (2, 3, 90), (3, 4, 1), (4, 5, 80)],
        )
    }

    #[test]
    fn test_two_pairs() {
        let matrix = matrix_of(4, &[(0, 1, 50), (2, 3, 40)]);
        let contigs = contigs_of(&[100; 4], &[false; 4]);
        let opt = ClusterOpt {
            k: 2,
            ..Default::default()
        };

        let clusters = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.get(0).unwrap(), &[0, 1]);
        assert_eq!(clusters.get(1).unwrap(), &[2, 3]);
        assert_eq!(clusters.length(0), 200);
        assert_eq!(clusters.length(1), 200);
    }

    #[test]
    fn test_no_informative_contigs() {
        let matrix = ContactMatrix::new(1);
        let contigs = contigs_of(&[100], &[true]);
        let clusters = cluster(&matrix, &contigs, &ClusterOpt::default()).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_no_links_all_singletons() {
        let matrix = ContactMatrix::new(3);
        let contigs = contigs_of(&[10, 30, 20], &[false, false, false]);
        let clusters = cluster(&matrix, &contigs, &ClusterOpt::default()).unwrap();
        assert_eq!(clusters.len(), 3);
        let groups: Vec<&[usize]> = clusters.iter().collect();
        assert_eq!(groups, vec![&[1][..], &[2][..], &[0][..]]);
    }

    #[test]
    fn test_skipped_contigs_never_merge() {
        let matrix = matrix_of(3, &[(0, 1, 100), (1, 2, 5)]);
        let contigs = contigs_of(&[100, 100, 100], &[true, false, false]);
        let clusters = cluster(&matrix, &contigs, &ClusterOpt::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.get(0).unwrap(), &[1, 2]);
    }

    #[test]
    fn test_merge_sizes_and_ids() {
        let matrix = chained_pairs();
        let mut p = Partitioner::new(&matrix, &[false; 6], ClusterOpt { k: 1, ..Default::default() }).unwrap();
        p.run();

        let merges = p.merges();
        assert_eq!(merges.len(), 5);
        for (m, merge) in merges.iter().enumerate() {
            assert_eq!(merge.new_id, 6 + m);
            assert!(merge.a < merge.b);
        }
        let sizes: Vec<usize> = merges.iter().map(|m| m.size).collect();
        assert_eq!(sizes, vec![2, 2, 2, 4, 6]);
        for merge in merges {
            assert!(!p.cluster_exists(merge.a));
            assert!(!p.cluster_exists(merge.b));
        }
        assert_eq!(p.cluster_of(0), Some(10));
        assert_eq!(p.cluster_size(10), 6);
        assert_eq!(p.non_singletons(), 1);
    }

    #[test]
    fn test_live_candidates_reference_existing_clusters() {
        let matrix = chained_pairs();
        let mut p = Partitioner::new(&matrix, &[false; 6], ClusterOpt { k: 1, ..Default::default() }).unwrap();
        p.seed();
        while let Some(best) = p.pop_best() {
            p.merge(best);
            for (a, b, score) in p.live_candidates() {
                assert!(p.cluster_exists(a));
                assert!(p.cluster_exists(b));
                assert!(score > 0.0);
            }
        }
    }

    #[test]
    fn test_first_seen_tie_break() {
        let matrix = chained_pairs();
        let contigs = contigs_of(&[100; 6], &[false; 6]);
        let opt = ClusterOpt {
            k: 2,
            ..Default::default()
        };

        // After three merges both (6, 7) and (7, 8) score 0.25; (6, 7) was queued first
        let clusters = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.get(0).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(clusters.get(1).unwrap(), &[4, 5]);
    }

    #[test]
    fn test_stop_rule_below_target_runs_to_exhaustion() {
        let matrix = chained_pairs();
        let contigs = contigs_of(&[100; 6], &[false; 6]);

        // Three groups exist after three merges, but that is not more than N/2
        // merges; the count then drops below 3 and never returns to it.
        let opt = ClusterOpt {
            k: 3,
            ..Default::default()
        };
        let clusters = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.get(0).unwrap(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_min_linkage_threshold() {
        let matrix = matrix_of(4, &[(0, 1, 50), (1, 2, 3), (2, 3, 40)]);
        let contigs = contigs_of(&[100; 4], &[false; 4]);
        let opt = ClusterOpt {
            k: 1,
            min_linkage: 5.0,
            ..Default::default()
        };
        let clusters = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_sorted_by_length() {
        let matrix = matrix_of(5, &[(0, 1, 50), (2, 3, 40), (3, 4, 30)]);
        let contigs = contigs_of(&[500, 500, 100, 100, 100], &[false; 5]);
        let clusters = cluster(&matrix, &contigs, &ClusterOpt { k: 2, ..Default::default() }).unwrap();

        assert_eq!(clusters.get(0).unwrap(), &[0, 1]);
        assert_eq!(clusters.get(1).unwrap(), &[2, 3, 4]);
        let lens: Vec<usize> = (0..clusters.len()).map(|i| clusters.length(i)).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_recover_skipped() {
        let matrix = matrix_of(5, &[(0, 1, 50), (2, 3, 40), (4, 0, 10), (4, 2, 2)]);
        let contigs = contigs_of(&[100, 100, 100, 100, 500], &[false, false, false, false, true]);

        let disabled = cluster(&matrix, &contigs, &ClusterOpt { k: 2, ..Default::default() }).unwrap();
        assert_eq!(disabled.iter().map(|g| g.len()).sum::<usize>(), 4);

        let opt = ClusterOpt {
            k: 2,
            non_informative_ratio: 3.0,
            ..Default::default()
        };
        let recovered = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(recovered.get(0).unwrap(), &[0, 1, 4]);
        assert_eq!(recovered.length(0), 700);

        let opt = ClusterOpt {
            k: 2,
            non_informative_ratio: 6.0,
            ..Default::default()
        };
        let strict = cluster(&matrix, &contigs, &opt).unwrap();
        assert_eq!(strict.iter().map(|g| g.len()).sum::<usize>(), 4);
    }

    #[test]
    fn test_validate() {
        let opt = ClusterOpt {
            k: 0,
            ..Default::default()
        };
        assert!(matches!(opt.validate(), Err(HicError::Config(_))));

        let opt = ClusterOpt {
            non_informative_ratio: 0.5,
            ..Default::default()
        };
        assert!(opt.validate().is_err());

        let opt = ClusterOpt {
            non_informative_ratio: 1.0,
            ..Default::default()
        };
        assert!(opt.validate().is_err());

        let opt = ClusterOpt {
            min_linkage: f64::NAN,
            ..Default::default()
        };
        assert!(opt.validate().is_err());

        assert!(ClusterOpt::default().validate().is_ok());
    }

    #[test]
    fn test_clusters_file() {
        let contigs = contigs_of(&[100, 200, 400], &[false; 3]);
        let clusters = Clusters::sorted(vec![vec![0, 1], vec![2]], &contigs.lengths());

        let mut buf: Vec<u8> = vec![];
        clusters.write_to(&mut buf, &contigs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "#Group\tnContigs\tContigs\ng0\t1\tctg2\ng1\t2\tctg0 ctg1\n");

        let reader: Box<dyn BufRead> = Box::new(std::io::BufReader::new(std::io::Cursor::new(text)));
        let back = Clusters::from_reader(reader, &contigs).unwrap();
        assert_eq!(back, clusters);
    }
}
