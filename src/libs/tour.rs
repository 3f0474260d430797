use crate::libs::contig::Contigs;
use crate::libs::error::HicError;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Orientation::Forward),
            '-' => Some(Orientation::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered, oriented contig sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tour {
    pub entries: Vec<(usize, Orientation)>,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The same tour read from the other strand.
    pub fn reversed(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .rev()
                .map(|&(idx, o)| (idx, o.flip()))
                .collect(),
        }
    }

    /// `name+ name- ...`
    pub fn format(&self, contigs: &Contigs) -> String {
        itertools::join(
            self.entries
                .iter()
                .map(|&(idx, o)| format!("{}{}", contigs.name(idx), o)),
            " ",
        )
    }

    /// Parses a `name+ name- ...` line; the last character of each atom is the orientation.
    ///
    /// ```
    /// # use hicr::libs::contig::Contigs;
    /// # use hicr::libs::tour::{Orientation, Tour};
    /// let mut contigs = Contigs::new();
    /// contigs.push("ctg1", 100, false).unwrap();
    /// contigs.push("ctg2", 100, false).unwrap();
    ///
    /// let tour = Tour::parse("ctg2- ctg1+", &contigs).unwrap();
    /// assert_eq!(tour.entries, vec![(1, Orientation::Reverse), (0, Orientation::Forward)]);
    /// assert_eq!(tour.format(&contigs), "ctg2- ctg1+");
    /// ```
    pub fn parse(line: &str, contigs: &Contigs) -> Result<Self, HicError> {
        let mut entries = vec![];
        for atom in line.split_whitespace() {
            let mut chars = atom.chars();
            let orientation = chars
                .next_back()
                .and_then(Orientation::from_char)
                .ok_or_else(|| HicError::Integrity(format!("atom {} lacks an orientation", atom)))?;
            let name = chars.as_str();
            let idx = contigs
                .index_of(name)
                .ok_or_else(|| HicError::Integrity(format!("contig {} not found", name)))?;
            entries.push((idx, orientation));
        }
        Ok(Self { entries })
    }
}

/// Writes one `>PATH{i}` record per tour.
pub fn write_tours(writer: &mut dyn Write, tours: &[Tour], contigs: &Contigs) -> std::io::Result<()> {
    for (i, tour) in tours.iter().enumerate() {
        writer.write_fmt(format_args!(">PATH{}\n{}\n", i, tour.format(contigs)))?;
    }
    Ok(())
}
