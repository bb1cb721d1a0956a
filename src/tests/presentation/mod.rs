mod draw_tests;
