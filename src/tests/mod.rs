mod dice;
mod quick;
