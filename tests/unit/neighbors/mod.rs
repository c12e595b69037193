mod borders;
mod expansion;
mod strategy;
