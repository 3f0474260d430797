use crate::libs::error::HicError;
use std::collections::HashMap;
use std::io::BufRead;

/// A contig as seen by clustering and anchoring. Immutable after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    /// Index in the registry
    pub idx: usize,
    pub name: String,
    pub length: usize,
    /// Uninformative contigs (SHORT or REPETITIVE) do not take part in merges
    pub skip: bool,
}

/// Ordered registry of contigs with a name lookup.
#[derive(Debug, Default, Clone)]
pub struct Contigs {
    contigs: Vec<Contig>,
    idx_of: HashMap<String, usize>,
}

impl Contigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contig and returns its index. Names must be unique.
    pub fn push(&mut self, name: &str, length: usize, skip: bool) -> Result<usize, HicError> {
        if self.idx_of.contains_key(name) {
            return Err(HicError::Integrity(format!("duplicated contig {}", name)));
        }
        let idx = self.contigs.len();
        self.contigs.push(Contig {
            idx,
            name: name.to_string(),
            length,
            skip,
        });
        self.idx_of.insert(name.to_string(), idx);
        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Contig> {
        self.contigs.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.idx_of.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contig> {
        self.contigs.iter()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.contigs[idx].name
    }

    pub fn length(&self, idx: usize) -> usize {
        self.contigs[idx].length
    }

    pub fn skip_flags(&self) -> Vec<bool> {
        self.contigs.iter().map(|c| c.skip).collect()
    }

    pub fn lengths(&self) -> Vec<usize> {
        self.contigs.iter().map(|c| c.length).collect()
    }

    /// Marks contigs shorter than `min_len` as skipped. Returns how many were newly skipped.
    pub fn skip_shorter(&mut self, min_len: usize) -> usize {
        let mut n = 0;
        for contig in self.contigs.iter_mut() {
            if !contig.skip && contig.length < min_len {
                contig.skip = true;
                n += 1;
            }
        }
        n
    }

    /// Reads `name<TAB>length[<TAB>skip]` lines.
    ///
    /// ```
    /// let contigs = hicr::libs::contig::Contigs::from_tsv("tests/hic/contigs.tsv").unwrap();
    /// assert_eq!(contigs.len(), 6);
    /// assert_eq!(contigs.index_of("ctg3"), Some(2));
    /// assert!(contigs.get(4).unwrap().skip);
    /// assert!(!contigs.get(5).unwrap().skip);
    /// ```
    pub fn from_tsv(infile: &str) -> anyhow::Result<Self> {
        let reader = crate::libs::io::reader(infile)?;
        Self::from_reader(reader)
    }

    pub fn from_reader(reader: Box<dyn BufRead>) -> anyhow::Result<Self> {
        let mut contigs = Contigs::new();

        for res in crate::libs::io::data_lines(reader) {
            let (line_no, line) = res?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(HicError::Parse {
                    line: line_no,
                    message: "expected name and length".to_string(),
                }
                .into());
            }

            let length = fields[1].trim().parse::<usize>().map_err(|_| HicError::Parse {
                line: line_no,
                message: format!("invalid length '{}'", fields[1]),
            })?;
            let skip = match fields.get(2).map(|s| s.trim()) {
                None | Some("") | Some("0") => false,
                Some("1") => true,
                Some(other) => {
                    return Err(HicError::Parse {
                        line: line_no,
                        message: format!("invalid skip flag '{}'", other),
                    }
                    .into())
                }
            };

            contigs.push(fields[0].trim(), length, skip)?;
        }

        Ok(contigs)
    }
}

/// Dense, symmetric matrix of Hi-C link counts between contigs.
#[derive(Debug, Clone)]
pub struct ContactMatrix {
    size: usize,
    counts: Vec<u32>,
}

impl ContactMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.counts[i * self.size + j]
    }

    /// Adds links between two distinct contigs to both halves of the matrix.
    /// Intra-contig links carry no ordering information and are ignored.
    pub fn add(&mut self, i: usize, j: usize, count: u32) {
        if i == j {
            return;
        }
        self.counts[i * self.size + j] += count;
        self.counts[j * self.size + i] += count;
    }

    /// Row `i` of the matrix.
    pub fn row(&self, i: usize) -> &[u32] {
        &self.counts[i * self.size..(i + 1) * self.size]
    }

    /// Reads `name1<TAB>name2<TAB>count` lines against a contig registry.
    pub fn from_tsv(infile: &str, contigs: &Contigs) -> anyhow::Result<Self> {
        let reader = crate::libs::io::reader(infile)?;
        Self::from_reader(reader, contigs)
    }

    pub fn from_reader(reader: Box<dyn BufRead>, contigs: &Contigs) -> anyhow::Result<Self> {
        let mut matrix = ContactMatrix::new(contigs.len());

        for res in crate::libs::io::data_lines(reader) {
            let (line_no, line) = res?;
            let fields: Vec<&str> = line.split('\t').map(|s| s.trim()).collect();
            if fields.len() < 3 {
                return Err(HicError::Parse {
                    line: line_no,
                    message: "expected name1, name2 and count".to_string(),
                }
                .into());
            }
            let count = fields[2].parse::<u32>().map_err(|_| HicError::Parse {
                line: line_no,
                message: format!("invalid count '{}'", fields[2]),
            })?;

            match (contigs.index_of(fields[0]), contigs.index_of(fields[1])) {
                (Some(i), Some(j)) => matrix.add(i, j, count),
                _ => {
                    tracing::warn!("Line {}: contig pair {}-{} not found", line_no, fields[0], fields[1]);
                }
            }
        }

        Ok(matrix)
    }
}
