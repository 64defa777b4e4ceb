use crate::model::Attribute;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One unit over every row and attribute.
    Direct,
    /// Row blocks crossed with attribute groups.
    Chunked,
}

/// Processing units of one run: every row block is paired with every
/// attribute group.
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    pub mode: ExecutionMode,
    pub row_blocks: Vec<Range<usize>>,
    pub attribute_groups: Vec<Vec<Attribute>>,
}

impl ChunkPlan {
    pub fn direct(rows: usize, attributes: &[Attribute]) -> Self {
        Self {
            mode: ExecutionMode::Direct,
            row_blocks: vec![0..rows],
            attribute_groups: vec![attributes.to_vec()],
        }
    }

    pub fn chunked(
        rows: usize,
        attributes: &[Attribute],
        row_block_size: usize,
        attribute_group_size: usize,
    ) -> Self {
        Self {
            mode: ExecutionMode::Chunked,
            row_blocks: row_blocks(rows, row_block_size),
            attribute_groups: attribute_groups(attributes, attribute_group_size),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.row_blocks.len() * self.attribute_groups.len()
    }
}

/// Consecutive row ranges of `block_size` rows; the last may be shorter.
/// An empty relation still forms one empty block.
pub fn row_blocks(rows: usize, block_size: usize) -> Vec<Range<usize>> {
    if rows == 0 {
        return vec![0..0];
    }
    let block_size = block_size.max(1);
    (0..rows)
        .step_by(block_size)
        .map(|start| start..(start + block_size).min(rows))
        .collect()
}

/// Consecutive attribute groups of `group_size`; the last may be smaller.
pub fn attribute_groups(attributes: &[Attribute], group_size: usize) -> Vec<Vec<Attribute>> {
    attributes
        .chunks(group_size.max(1))
        .map(|group| group.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;

    #[test]
    fn test_row_blocks() {
        assert_eq!(row_blocks(650, 300), vec![0..300, 300..600, 600..650]);
        assert_eq!(row_blocks(300, 300), vec![0..300]);
        assert_eq!(row_blocks(0, 300), vec![0..0]);
    }

    #[test]
    fn test_attribute_groups() {
        let attrs: Vec<Attribute> = (0..16).map(|i| Attribute::new(format!("c{}", i))).collect();
        let groups = attribute_groups(&attrs, 7);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![7, 7, 2]);
        assert_eq!(groups[2], attributes(["c14", "c15"]));
    }

    #[test]
    fn test_unit_count() {
        let attrs: Vec<Attribute> = (0..9).map(|i| Attribute::new(format!("c{}", i))).collect();
        assert_eq!(ChunkPlan::chunked(601, &attrs, 300, 7).unit_count(), 6);
        assert_eq!(ChunkPlan::direct(601, &attrs).unit_count(), 1);
    }
}
