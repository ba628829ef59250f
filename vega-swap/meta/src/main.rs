fn main() {
    multiversx_sc_meta_lib::cli_main::<vega_swap::AbiProvider>();
}
