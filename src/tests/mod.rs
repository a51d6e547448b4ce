pub mod utils;

mod repository_tests;
