mod change_flag;

pub use change_flag::ChangeFlag;
