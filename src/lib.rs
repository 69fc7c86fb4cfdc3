pub mod configuration;

pub mod function {
    pub mod function;
    pub mod functionerror;
    pub mod functionpoint;
    pub mod functions;

    pub mod basic {
        pub mod exp;
        pub mod log;
    }

    pub mod meta {
        pub mod composition;
        pub mod mult;
        pub mod power;
        pub mod scale;
        pub mod shift;
        pub mod sum;
    }
}

pub mod math {
    pub mod integration;
}

pub mod tabulated {
    pub mod tabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod linkedlisttabulatedfunction;
    pub mod tabulatedfunctions;
}

pub mod task;
