pub mod application;
pub mod auth;
pub mod city;
pub mod entity;
pub mod evaluator;
pub mod group;
pub mod notice;
pub mod profile;
