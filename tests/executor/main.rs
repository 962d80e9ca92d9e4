mod command_test;
