//! Struct stack item implementation for the Neo Virtual Machine.
//!
//! This module provides the Struct stack item implementation used in the Neo VM.

use crate::error::VmError;
use crate::error::VmResult;
use crate::reference_counter::ReferenceCounter;
use crate::stack_item::StackItem;
use crate::stack_item::stack_item_type::StackItemType;
use std::sync::Arc;

/// Represents a struct of stack items in the VM.
#[derive(Debug, Clone)]
pub struct Struct {
    /// The items in the struct.
    items: Vec<StackItem>,
    /// The reference ID for the VM.
    reference_id: Option<usize>,
}

impl Struct {
    /// Creates a new struct with the specified items and reference counter.
    pub fn new(items: Vec<StackItem>, reference_counter: Option<Arc<ReferenceCounter>>) -> Self {
        let mut reference_id = None;

        // Register with reference counter if provided
        if let Some(rc) = &reference_counter {
            reference_id = Some(rc.add_reference());
        }

        Self {
            items,
            reference_id,
        }
    }

    /// Gets the items in the struct.
    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Gets a mutable reference to the items in the struct.
    pub fn items_mut(&mut self) -> &mut Vec<StackItem> {
        &mut self.items
    }

    /// Gets the item at the specified index.
    pub fn get(&self, index: usize) -> VmResult<&StackItem> {
        self.items
            .get(index)
            .ok_or_else(|| VmError::invalid_operation_msg(format!("Index out of range: {}", index)))
    }

    /// Sets the item at the specified index.
    pub fn set(&mut self, index: usize, item: StackItem) -> VmResult<()> {
        if index >= self.items.len() {
            return Err(VmError::invalid_operation_msg(format!(
                "Index out of range: {}",
                index
                    )));
        }

        self.items[index] = item;
        Ok(())
    }

    /// Adds an item to the end of the struct.
    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    /// Removes and returns the last item in the struct.
    pub fn pop(&mut self) -> VmResult<StackItem> {
        self.items
            .pop()
            .ok_or_else(|| VmError::invalid_operation_msg("Struct is empty"))
    }

    /// Gets the number of items in the struct.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the struct is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all items from the struct.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Creates a deep copy of the struct.
    pub fn deep_copy(&self, reference_counter: Option<Arc<ReferenceCounter>>) -> Self {
        let items = self.items.iter().map(|item| item.deep_clone()).collect();
        Self::new(items, reference_counter)
    }

    /// Gets the type of the stack item.
    pub fn stack_item_type(&self) -> StackItemType {
        StackItemType::Struct
    }

    /// Converts the struct to a boolean.
    pub fn to_boolean(&self) -> bool {
        !self.items.is_empty()
    }
}

impl Drop for Struct {
    fn drop(&mut self) {
        // Reference cleanup is handled by the ReferenceCounter automatically
    }
}
