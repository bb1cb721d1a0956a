mod catalog_tests;
mod sortable_tests;
mod workflow_tests;
