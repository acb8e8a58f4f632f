mod test_chain_basic;
mod test_sample_basic;
