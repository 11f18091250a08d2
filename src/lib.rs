pub mod shared {
    pub mod core {
        pub mod access;
        pub mod decision;
        pub mod directory;
        pub mod errors;
        pub mod notifications;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod database;
        pub mod intent_outbox;
        pub mod notification_sink;
        pub mod ports;
    }
}

pub mod modules {
    pub mod scheduling {
        pub mod core {
            pub mod errors;
            pub mod events;
            pub mod shape;
            pub mod shift;
            pub mod state;
        }
        pub mod use_cases {
            pub mod assign_shift {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_assignment {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_assignment {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod publish_shifts {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_rotas {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_templates {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod week_view {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
                pub mod query;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod repository;
            }
        }
    }

    pub mod time_accounting {
        pub mod core {
            pub mod calculations;
            pub mod errors;
            pub mod events;
            pub mod time_entry;
        }
        pub mod use_cases {
            pub mod clock_in {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod clock_out {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod track_breaks {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod edit_time_entry {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod repository;
            }
        }
    }

    pub mod discrepancies {
        pub mod core {
            pub mod detector;
        }
        pub mod use_cases {
            pub mod daily_report {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod projection;
                pub mod query;
            }
            pub mod entry_discrepancies {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod repository;
            }
        }
    }

    pub mod approvals {
        pub mod core {
            pub mod errors;
            pub mod events;
            pub mod requests;
            pub mod state;
        }
        pub mod use_cases {
            pub mod decide_timesheet {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod bulk_approve_timesheets {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod decide_leave_request {
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod decide_swap_request {
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod submit_leave_request {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod submit_swap_request {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod repository;
            }
        }
    }

    pub mod dashboard {
        pub mod feed;
        pub mod snapshot;
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures;

    pub mod e2e {
        pub mod approvals_flow_tests;
        pub mod notification_flow_tests;
        pub mod scheduling_flow_tests;
        pub mod time_accounting_flow_tests;
    }
}
