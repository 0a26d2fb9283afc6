pub type CmdResult<T> = importfix::Result<(T, i32)>;

pub mod strip;
