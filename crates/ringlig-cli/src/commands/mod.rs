pub mod correct;
