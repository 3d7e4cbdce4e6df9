//! # 隐写方案
//!
//! 三种互相独立的嵌入/提取方案。每个 `embed` 都在输入网格的副本上工作并返回该副本，
//! 每个 `extract` 都要求调用方给出期望的消息长度 (消息本身不携带长度信息)。

pub mod block;
pub mod kjb;
pub mod lsb;

pub use block::BlockSize;
pub use kjb::KjbOptions;
pub use lsb::{LsbOptions, ScanOrder};
