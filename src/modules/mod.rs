/// 模块管理
/// 包含所有业务模块的定义和导出
pub mod account;
pub mod base;
