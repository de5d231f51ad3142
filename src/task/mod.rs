// src/task/mod.rs

//! Work items, the task descriptor, and its publication on disk.

pub mod descriptor;
pub mod item;
pub mod list;
pub mod writer;

pub use descriptor::{TaskDescriptor, TaskOptions};
pub use item::{WorkItem, WorkItemKind};
pub use list::{parse_list, TaskListBuilder};
pub use writer::{descriptor_path, DescriptorWriter};
