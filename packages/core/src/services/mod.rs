pub mod board;
pub mod provider;
pub mod upload;

#[cfg(test)]
pub mod mock_board;
