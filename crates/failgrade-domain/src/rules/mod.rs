pub mod failgrade;
