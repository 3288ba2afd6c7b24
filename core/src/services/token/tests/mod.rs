mod support;

mod cleanup_tests;
