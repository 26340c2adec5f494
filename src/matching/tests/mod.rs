mod engine;
mod skills;
