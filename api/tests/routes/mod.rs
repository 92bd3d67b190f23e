mod auto_graders_test;
mod health_test;
