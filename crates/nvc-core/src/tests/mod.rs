mod bounds_scenarios;
mod eval_scenarios;
