use super::Block;
use crate::types::BlockId;

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCommon {
    pub id: BlockId,
    pub children: Vec<Block>,
    pub has_children: bool,
    pub archived: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            children: Vec::new(),
            has_children: false,
            archived: false,
        }
    }

    /// Marks the block as a parent in the remote store without resolving
    /// anything beneath it.
    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}

/// Payload structs deserialize with a blank common section; the parser
/// fills it in from the envelope afterwards.
impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::from_normalized(String::new()))
    }
}
