pub mod flags_tests;
pub mod fold_tests;
pub mod enrollment_tests;
pub mod proof_tests;
pub mod ledger_tests;
