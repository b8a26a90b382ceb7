//! 数据访问层
//!
//! 所有函数接受任意 SQLite executor，既可传连接池也可传事务。

pub mod quote_repo;
pub mod role_repo;
pub mod user_repo;
