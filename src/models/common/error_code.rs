/// JSON 接口统一业务码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    DatabaseError = 5001,
}
