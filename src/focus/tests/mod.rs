mod snapshot_tests;
mod zone_tests;
